pub mod convert;
pub mod driver;
pub mod encoding;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod zhconv;

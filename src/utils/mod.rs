pub mod helpers;
pub mod logging;
pub mod testdata;

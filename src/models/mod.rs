mod feed;

pub use feed::*;

#[cfg(test)]
pub mod testutil;

pub mod advise;
pub mod audit;
pub mod play;

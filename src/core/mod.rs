//! Hardware-independent building blocks shared by the firmware layers

pub mod net;
pub mod storage;

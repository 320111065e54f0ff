//! Wire messages of the two deployed contracts.

pub mod application;

pub mod storage;

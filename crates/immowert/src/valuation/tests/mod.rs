mod common;
mod comparison;
mod income;

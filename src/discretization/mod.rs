pub mod connectivity;
pub mod generator;
pub mod mesh;

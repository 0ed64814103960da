pub mod normalize;
pub mod pipeline;
pub mod rasterize;
pub mod resize;

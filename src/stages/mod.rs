pub mod classifier;
pub mod clip_transparent_border;
pub mod convert_color;
pub mod erode_edges;
pub mod key_sampler;
pub mod region_mask;

// Display slots — render/reset state for the six variants.

pub mod commands;
pub mod slots;

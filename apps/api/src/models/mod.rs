// Wire types shared with the analysis backend.

pub mod analysis;
pub mod email;
pub mod jobs;
pub mod rewrite;

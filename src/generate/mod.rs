//! Asset generation
//!
//! The ball sprite texture is generated rather than checked in.

pub mod ball;

pub use ball::{BALL_TEXTURE_FILE, BallTextureConfig, render_ball, run};

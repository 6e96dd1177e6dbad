pub mod anim;
pub mod ease;
pub mod keyframe;
pub mod set;

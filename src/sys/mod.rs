pub mod assets;
pub mod audio;
pub mod launch;
pub mod runtime;

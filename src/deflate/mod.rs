pub mod block;
pub mod decompressor;
pub mod dynamic;
pub mod header;
pub mod tables;
pub mod tokens;
pub mod window;

pub use decompressor::{DecompressStats, Decompressor};
pub use header::{BlockHeader, BlockType};
pub use tokens::Token;
pub use window::{BufferWindow, OutputWindow, StreamWindow};

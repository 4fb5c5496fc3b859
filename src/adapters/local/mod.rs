//! Local adapters: external tools on this host and the HTTP surface.

pub mod ffmpeg;
pub mod http;
pub mod ids;
pub mod ytdlp;

pub use ffmpeg::Ffmpeg;
pub use ids::TimestampJobIds;
pub use ytdlp::YtDlp;

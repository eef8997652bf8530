mod interface;
mod manual;
mod mono_clock;
mod system;

pub(crate) use interface::duration_millis;
pub use interface::{
    DEFAULT_EPOCH, DISCORD_EPOCH, INSTAGRAM_EPOCH, TWITTER_EPOCH, TimeSource, UNIX_EPOCH_ORIGIN,
};
pub use manual::*;
pub use mono_clock::*;
pub use system::*;

pub mod clash;
pub mod common;
pub mod ss;
pub mod ssr;
pub mod trojan;
pub mod vmess;

pub use clash::explode_native;
pub use common::{explode, find_decoder, LinkDecoder, LINK_DECODERS};
pub use ss::explode_ss;
pub use ssr::explode_ssr;
pub use trojan::explode_trojan;
pub use vmess::explode_vmess;

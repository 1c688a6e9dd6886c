mod squid;

pub use squid::*;

//! SAI API tables.
//!
//! A driver exposes one function table per subsystem. The server asks for
//! the table before every call; a driver that cannot provide it makes the
//! whole operation fail with a "capability unavailable" error.

use std::fmt;

macro_rules! sai_apis {
    ($($variant:ident => $name:literal,)*) => {
        /// SAI API identifiers (`sai_api_t`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SaiApi {
            $($variant,)*
        }

        impl SaiApi {
            pub const fn name(&self) -> &'static str {
                match self {
                    $(SaiApi::$variant => concat!("SAI_API_", $name),)*
                }
            }
        }
    };
}

sai_apis! {
    Switch => "SWITCH",
    Port => "PORT",
    Fdb => "FDB",
    Vlan => "VLAN",
    VirtualRouter => "VIRTUAL_ROUTER",
    Route => "ROUTE",
    NextHop => "NEXT_HOP",
    NextHopGroup => "NEXT_HOP_GROUP",
    RouterInterface => "ROUTER_INTERFACE",
    Neighbor => "NEIGHBOR",
    Acl => "ACL",
    Hostif => "HOSTIF",
    Mirror => "MIRROR",
    Stp => "STP",
    Lag => "LAG",
    Policer => "POLICER",
    Wred => "WRED",
    QosMap => "QOS_MAP",
    Queue => "QUEUE",
    Scheduler => "SCHEDULER",
    SchedulerGroup => "SCHEDULER_GROUP",
    Buffer => "BUFFER",
    Bridge => "BRIDGE",
    Tunnel => "TUNNEL",
    DebugCounter => "DEBUG_COUNTER",
    SystemPort => "SYSTEM_PORT",
}

impl fmt::Display for SaiApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

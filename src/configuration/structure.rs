use std::ops::RangeInclusive;

use serde::Serialize;

use super::bounded::BoundedStringList;


pub const DEFAULT_SIP_LISTEN_PORT: i32 = 5060;
pub const DEFAULT_RTP_PORT_LOW: i32 = 7070;
pub const DEFAULT_RTP_PORT_HIGH: i32 = 7080;
pub const DEFAULT_RTP_TIMEOUT: i32 = 300;


/// The entire daemon configuration.
///
/// Construct it with [`Configuration::default`], hand it to a
/// [`ConfigurationLoader`][super::ConfigurationLoader] by mutable reference,
/// and treat it as read-only afterwards.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct Configuration {
    /// Debug class bit mask (`debug_level`).
    pub debug_level: i32,

    /// Port the daemon listens on for SIP traffic (`sip_listen_port`).
    pub sip_listen_port: i32,

    /// Non-zero to detach from the terminal (`daemonize`).
    pub daemonize: i32,

    /// Name of the interface facing the internal network (`if_inbound`).
    pub inbound_interface: Option<String>,

    /// Name of the interface facing the public network (`if_outbound`).
    pub outbound_interface: Option<String>,

    /// Lower bound of the RTP relay port range (`rtp_port_low`).
    pub rtp_port_low: i32,

    /// Upper bound of the RTP relay port range (`rtp_port_high`).
    pub rtp_port_high: i32,

    /// Seconds of inactivity after which an RTP stream is dropped (`rtp_timeout`).
    pub rtp_timeout: i32,

    /// Non-zero to relay RTP traffic (`rtp_proxy_enable`).
    pub rtp_proxy_enable: i32,

    /// Unprivileged user to switch to after startup (`user`).
    pub user: Option<String>,

    /// Directory to chroot into after startup (`chrootjail`).
    pub chroot_jail: Option<String>,

    /// Hosts allowed to register with the relay (`hosts_allow_reg`).
    pub hosts_allow_register: Option<String>,

    /// Hosts allowed to send SIP traffic through the relay (`hosts_allow_sip`).
    pub hosts_allow_sip: Option<String>,

    /// Hosts whose SIP traffic is refused (`hosts_deny_sip`).
    pub hosts_deny_sip: Option<String>,

    /// Realm presented in proxy authentication challenges (`proxy_auth_realm`).
    pub proxy_auth_realm: Option<String>,

    /// Shared proxy authentication password (`proxy_auth_passwd`).
    /// Never serialized.
    #[serde(skip_serializing)]
    pub proxy_auth_password: Option<String>,

    /// File with per-user proxy authentication passwords (`proxy_auth_pwfile`).
    pub proxy_auth_password_file: Option<String>,

    /// Hosts whose identity is rewritten in outgoing requests (`mask_host`).
    pub mask_host: BoundedStringList,

    /// Replacement identities, index-aligned with `mask_host` (`masked_host`).
    pub masked_host: BoundedStringList,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            debug_level: 0,
            sip_listen_port: DEFAULT_SIP_LISTEN_PORT,
            daemonize: 0,
            inbound_interface: None,
            outbound_interface: None,
            rtp_port_low: DEFAULT_RTP_PORT_LOW,
            rtp_port_high: DEFAULT_RTP_PORT_HIGH,
            rtp_timeout: DEFAULT_RTP_TIMEOUT,
            rtp_proxy_enable: 1,
            user: None,
            chroot_jail: None,
            hosts_allow_register: None,
            hosts_allow_sip: None,
            hosts_deny_sip: None,
            proxy_auth_realm: None,
            proxy_auth_password: None,
            proxy_auth_password_file: None,
            mask_host: BoundedStringList::default(),
            masked_host: BoundedStringList::default(),
        }
    }
}

impl Configuration {
    #[inline]
    pub fn is_daemonized(&self) -> bool {
        self.daemonize != 0
    }

    #[inline]
    pub fn is_rtp_proxy_enabled(&self) -> bool {
        self.rtp_proxy_enable != 0
    }

    /// Returns the configured RTP relay port range (both ends inclusive).
    pub fn rtp_port_range(&self) -> RangeInclusive<i32> {
        self.rtp_port_low..=self.rtp_port_high
    }
}

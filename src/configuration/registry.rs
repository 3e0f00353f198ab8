use std::fmt::{self, Display, Formatter};

use super::{bounded::BoundedStringList, structure::Configuration};


/// The value type a keyword expects.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldType {
    Int32,
    String,
    StringList,
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int32 => write!(f, "integer"),
            FieldType::String => write!(f, "string"),
            FieldType::StringList => write!(f, "string list"),
        }
    }
}


/// A typed accessor for the [`Configuration`] field a keyword writes into.
#[derive(Clone, Copy)]
pub enum FieldSlot {
    Int32(fn(&mut Configuration) -> &mut i32),
    String(fn(&mut Configuration) -> &mut Option<String>),
    StringList(fn(&mut Configuration) -> &mut BoundedStringList),
}

impl FieldSlot {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldSlot::Int32(_) => FieldType::Int32,
            FieldSlot::String(_) => FieldType::String,
            FieldSlot::StringList(_) => FieldType::StringList,
        }
    }
}

impl fmt::Debug for FieldSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldSlot")
            .field(&self.field_type())
            .finish()
    }
}


#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor {
    pub keyword: &'static str,
    pub slot: FieldSlot,
}

impl FieldDescriptor {
    pub const fn new(keyword: &'static str, slot: FieldSlot) -> Self {
        Self { keyword, slot }
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.slot.field_type()
    }
}


/// A keyword found in a line, along with the byte offset just past it.
#[derive(Clone, Copy, Debug)]
pub struct KeywordMatch<'r> {
    pub descriptor: &'r FieldDescriptor,
    pub keyword_end: usize,
}


/// An ordered keyword table. Lookups are first-match-wins in registration order.
#[derive(Clone, Copy, Debug)]
pub struct FieldRegistry<'r> {
    descriptors: &'r [FieldDescriptor],
}

impl<'r> FieldRegistry<'r> {
    pub const fn new(descriptors: &'r [FieldDescriptor]) -> Self {
        Self { descriptors }
    }

    /// The registry of every keyword understood by the daemon.
    pub fn daemon() -> FieldRegistry<'static> {
        FieldRegistry::new(DAEMON_FIELDS)
    }

    pub fn descriptors(&self) -> &'r [FieldDescriptor] {
        self.descriptors
    }

    /// Finds the first descriptor whose keyword occurs anywhere in `line`.
    ///
    /// The match is a plain substring search: it is neither anchored to the
    /// start of the line nor to word boundaries, and a later, longer keyword
    /// never takes precedence over an earlier one.
    pub fn find(&self, line: &str) -> Option<KeywordMatch<'r>> {
        self.descriptors.iter().find_map(|descriptor| {
            line.find(descriptor.keyword)
                .map(|keyword_start| KeywordMatch {
                    descriptor,
                    keyword_end: keyword_start + descriptor.keyword.len(),
                })
        })
    }
}

impl Default for FieldRegistry<'static> {
    fn default() -> Self {
        Self::daemon()
    }
}


// `hosts_deny_sip` is registered twice; the second entry can never match.
static DAEMON_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("debug_level", FieldSlot::Int32(|c| &mut c.debug_level)),
    FieldDescriptor::new("sip_listen_port", FieldSlot::Int32(|c| &mut c.sip_listen_port)),
    FieldDescriptor::new("daemonize", FieldSlot::Int32(|c| &mut c.daemonize)),
    FieldDescriptor::new("if_inbound", FieldSlot::String(|c| &mut c.inbound_interface)),
    FieldDescriptor::new("if_outbound", FieldSlot::String(|c| &mut c.outbound_interface)),
    FieldDescriptor::new("rtp_port_low", FieldSlot::Int32(|c| &mut c.rtp_port_low)),
    FieldDescriptor::new("rtp_port_high", FieldSlot::Int32(|c| &mut c.rtp_port_high)),
    FieldDescriptor::new("rtp_timeout", FieldSlot::Int32(|c| &mut c.rtp_timeout)),
    FieldDescriptor::new("rtp_proxy_enable", FieldSlot::Int32(|c| &mut c.rtp_proxy_enable)),
    FieldDescriptor::new("user", FieldSlot::String(|c| &mut c.user)),
    FieldDescriptor::new("chrootjail", FieldSlot::String(|c| &mut c.chroot_jail)),
    FieldDescriptor::new("hosts_allow_reg", FieldSlot::String(|c| &mut c.hosts_allow_register)),
    FieldDescriptor::new("hosts_allow_sip", FieldSlot::String(|c| &mut c.hosts_allow_sip)),
    FieldDescriptor::new("hosts_deny_sip", FieldSlot::String(|c| &mut c.hosts_deny_sip)),
    FieldDescriptor::new("hosts_deny_sip", FieldSlot::String(|c| &mut c.hosts_deny_sip)),
    FieldDescriptor::new("proxy_auth_realm", FieldSlot::String(|c| &mut c.proxy_auth_realm)),
    FieldDescriptor::new("proxy_auth_passwd", FieldSlot::String(|c| &mut c.proxy_auth_password)),
    FieldDescriptor::new("proxy_auth_pwfile", FieldSlot::String(|c| &mut c.proxy_auth_password_file)),
    FieldDescriptor::new("mask_host", FieldSlot::StringList(|c| &mut c.mask_host)),
    FieldDescriptor::new("masked_host", FieldSlot::StringList(|c| &mut c.masked_host)),
];

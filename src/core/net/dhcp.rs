//! DHCP Protocol Implementation
//!
//! Message parsing and response building for the stateless server that hands
//! out addresses to configuration portal clients.

use core::net::Ipv4Addr;

/// DHCP options
const DHCP_OPTION_MESSAGE_TYPE: u8 = 53;
const DHCP_OPTION_SERVER_ID: u8 = 54;
const DHCP_OPTION_LEASE_TIME: u8 = 51;
const DHCP_OPTION_SUBNET_MASK: u8 = 1;
const DHCP_OPTION_ROUTER: u8 = 3;
const DHCP_OPTION_DNS: u8 = 6;
const DHCP_OPTION_END: u8 = 255;

/// DHCP magic cookie
const DHCP_MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

const LEASE_TIME_SECS: u32 = 3600;
const SUBNET_MASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

/// Client addresses are taken from `.2..=.50` of the portal network
const FIRST_CLIENT_HOST: u8 = 2;
const CLIENT_POOL_SIZE: u8 = 49;

/// BOOTP header + magic cookie
const MIN_DHCP_PACKET_SIZE: usize = 240;

/// Largest response written by `build_dhcp_response`
pub const MAX_RESPONSE_SIZE: usize = MIN_DHCP_PACKET_SIZE + 3 + 5 * 6 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhcpMessageType {
    Discover,
    Offer,
    Request,
    Ack,
}

impl DhcpMessageType {
    const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Discover),
            2 => Some(Self::Offer),
            3 => Some(Self::Request),
            5 => Some(Self::Ack),
            _ => None,
        }
    }

    const fn code(self) -> u8 {
        match self {
            Self::Discover => 1,
            Self::Offer => 2,
            Self::Request => 3,
            Self::Ack => 5,
        }
    }

    /// Reply the server sends for this client message, if any
    pub const fn reply(self) -> Option<Self> {
        match self {
            Self::Discover => Some(Self::Offer),
            Self::Request => Some(Self::Ack),
            Self::Offer | Self::Ack => None,
        }
    }
}

/// Parsed DHCP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpRequest {
    pub xid: [u8; 4],
    pub client_mac: [u8; 6],
    pub message_type: DhcpMessageType,
}

/// Parse a DHCP request from a raw packet
///
/// Returns `None` if the packet is truncated, is not a BOOTREQUEST or carries
/// a message type the server does not handle.
pub fn parse_dhcp_request(packet: &[u8]) -> Option<DhcpRequest> {
    if packet.len() < MIN_DHCP_PACKET_SIZE {
        return None;
    }

    // op must be BOOTREQUEST
    if packet[0] != 1 {
        return None;
    }

    if packet[236..240] != DHCP_MAGIC_COOKIE {
        return None;
    }

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);

    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    let message_type = find_dhcp_option(&packet[240..], DHCP_OPTION_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())
        .and_then(DhcpMessageType::from_code)?;

    Some(DhcpRequest {
        xid,
        client_mac,
        message_type,
    })
}

/// Derive a stable client address from its MAC, inside the server's /24
pub fn allocate_ip(server: Ipv4Addr, mac: &[u8; 6]) -> Ipv4Addr {
    let [a, b, c, _] = server.octets();
    Ipv4Addr::new(a, b, c, mac[5] % CLIENT_POOL_SIZE + FIRST_CLIENT_HOST)
}

/// Build an OFFER or ACK for `request` into `buffer`
///
/// The server advertises itself as router and DNS so clients reach the portal.
/// Returns the length of the response, or `None` if `buffer` is too small.
pub fn build_dhcp_response(
    server: Ipv4Addr,
    buffer: &mut [u8],
    request: &DhcpRequest,
    offered_ip: Ipv4Addr,
    response_type: DhcpMessageType,
) -> Option<usize> {
    let buffer = buffer.get_mut(..MAX_RESPONSE_SIZE)?;
    buffer.fill(0);

    buffer[0] = 2; // op: BOOTREPLY
    buffer[1] = 1; // htype: Ethernet
    buffer[2] = 6; // hlen
    buffer[4..8].copy_from_slice(&request.xid);
    buffer[10..12].copy_from_slice(&[0x80, 0x00]); // broadcast flag
    buffer[16..20].copy_from_slice(&offered_ip.octets());
    buffer[20..24].copy_from_slice(&server.octets());
    buffer[28..34].copy_from_slice(&request.client_mac);
    buffer[236..240].copy_from_slice(&DHCP_MAGIC_COOKIE);

    let mut options = OptionWriter {
        buffer,
        position: MIN_DHCP_PACKET_SIZE,
    };
    options.put(DHCP_OPTION_MESSAGE_TYPE, &[response_type.code()]);
    options.put(DHCP_OPTION_SERVER_ID, &server.octets());
    options.put(DHCP_OPTION_LEASE_TIME, &LEASE_TIME_SECS.to_be_bytes());
    options.put(DHCP_OPTION_SUBNET_MASK, &SUBNET_MASK.octets());
    options.put(DHCP_OPTION_ROUTER, &server.octets());
    options.put(DHCP_OPTION_DNS, &server.octets());
    options.buffer[options.position] = DHCP_OPTION_END;

    Some(options.position + 1)
}

struct OptionWriter<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl OptionWriter<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn put(&mut self, code: u8, value: &[u8]) {
        let start = self.position;
        self.buffer[start] = code;
        self.buffer[start + 1] = value.len() as u8;
        self.buffer[start + 2..start + 2 + value.len()].copy_from_slice(value);
        self.position = start + 2 + value.len();
    }
}

/// Find a DHCP option in the options section
///
/// The options slice should start after the magic cookie.
fn find_dhcp_option(options: &[u8], option_code: u8) -> Option<&[u8]> {
    let mut i = 0;

    while i < options.len() {
        let code = options[i];
        if code == DHCP_OPTION_END {
            break;
        }
        // pad
        if code == 0 {
            i += 1;
            continue;
        }
        if i + 1 >= options.len() {
            break;
        }
        let len = options[i + 1] as usize;
        if i + 2 + len > options.len() {
            break;
        }
        if code == option_code {
            return Some(&options[i + 2..i + 2 + len]);
        }
        i += 2 + len;
    }
    None
}

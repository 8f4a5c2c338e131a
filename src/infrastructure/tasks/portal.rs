//! Configuration portal tasks
//!
//! DHCP and HTTP servers bound to the access point stack. Both run for the
//! whole uptime; they only see traffic while the access point is up.

use core::net::Ipv4Addr;

use embassy_net::{
    Stack,
    tcp::TcpSocket,
    udp::{PacketMetadata, UdpSocket},
};
use embassy_time::Duration;

use crate::config::PROVISIONING;
use crate::controllers::portal::PortalHttpController;
use crate::core::net::{
    dhcp::{MAX_RESPONSE_SIZE, allocate_ip, build_dhcp_response, parse_dhcp_request},
    http::HttpConnection,
};

const DHCP_SERVER_PORT: u16 = 67;
const DHCP_CLIENT_PORT: u16 = 68;

const HTTP_RX_BUFFER_SIZE: usize = 1536;
const HTTP_TX_BUFFER_SIZE: usize = 2048;
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// DHCP server task
///
/// Answers DISCOVER with OFFER and REQUEST with ACK, allocating addresses
/// statelessly from the client MAC.
#[embassy_executor::task]
pub async fn dhcp_server_task(stack: Stack<'static>, server: Ipv4Addr) {
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; 1024];

    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    if let Err(e) = socket.bind(DHCP_SERVER_PORT) {
        log::error!("dhcp_server: failed to bind port {DHCP_SERVER_PORT}: {e:?}");
        return;
    }
    log::info!("dhcp_server: listening on port {DHCP_SERVER_PORT}");

    let mut packet = [0u8; 576];
    let mut response = [0u8; MAX_RESPONSE_SIZE];

    loop {
        let len = match socket.recv_from(&mut packet).await {
            Ok((len, _remote)) => len,
            Err(e) => {
                log::warn!("dhcp_server: recv error: {e:?}");
                continue;
            }
        };

        let Some(request) = parse_dhcp_request(&packet[..len]) else {
            continue;
        };
        let Some(response_type) = request.message_type.reply() else {
            continue;
        };

        let offered_ip = allocate_ip(server, &request.client_mac);
        let Some(response_len) =
            build_dhcp_response(server, &mut response, &request, offered_ip, response_type)
        else {
            continue;
        };
        log::debug!("dhcp_server: {response_type:?} {offered_ip}");

        let dest = (Ipv4Addr::BROADCAST, DHCP_CLIENT_PORT);
        if let Err(e) = socket.send_to(&response[..response_len], dest).await {
            log::warn!("dhcp_server: send error: {e:?}");
        }
    }
}

/// HTTP server task for the configuration form
#[embassy_executor::task]
pub async fn portal_http_task(stack: Stack<'static>, controller: &'static PortalHttpController) {
    let mut rx_buffer = [0u8; HTTP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; HTTP_TX_BUFFER_SIZE];
    log::info!("portal: http server on port {}", PROVISIONING.http_port);

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(HTTP_TIMEOUT));

        if let Err(e) = socket.accept(PROVISIONING.http_port).await {
            log::warn!("portal: accept error: {e:?}");
            continue;
        }

        let conn = match HttpConnection::from_socket(socket).await {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("portal: bad request: {e:?}");
                continue;
            }
        };

        if let Err(e) = controller.handle_request(conn).await {
            log::warn!("portal: connection error: {e:?}");
        }
    }
}

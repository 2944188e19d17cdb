pub mod treasury_engine;

use treasury_engine::*;

use diesel::{r2d2::ConnectionManager, PgConnection};
use zmq::Socket as ZmqSocket;

use core_types::*;
use msgs::*;

use midnight_connector::connector::{MidnightConnector, MidnightConnectorSettings};

pub async fn start(
    settings: TreasuryEngineSettings,
    midnight_connector_settings: MidnightConnectorSettings,
    api_recv: ZmqSocket,
    api_sender: ZmqSocket,
    cli_socket: ZmqSocket,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = r2d2::Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(settings.psql_url.clone()))
        .expect("Failed to create pool.");

    let midnight_connector = MidnightConnector::new(midnight_connector_settings);

    let mut treasury_engine = TreasuryEngine::new(Some(pool), midnight_connector, settings);
    treasury_engine.init_contracts();

    let mut listener = |msg: Message, destination: ServiceIdentity| {
        if let ServiceIdentity::Api = destination {
            utils::xzmq::send_as_bincode(&api_sender, &msg);
        }
    };

    let mut cli_listener = |msg: Message, _destination: ServiceIdentity| {
        utils::xzmq::send_as_bincode(&cli_socket, &msg);
    };

    loop {
        // Receiving msgs from the api.
        if let Ok(frame) = api_recv.recv_msg(1) {
            if let Ok(message) = bincode::deserialize::<Message>(&frame) {
                treasury_engine.process_msg(message, &mut listener);
            };
        }

        if let Ok(frame) = cli_socket.recv_msg(1) {
            if let Ok(message) = bincode::deserialize::<Message>(&frame) {
                treasury_engine.process_msg(message, &mut cli_listener);
            };
        }
    }
}

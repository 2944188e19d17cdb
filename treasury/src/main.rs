use utils::xzmq::SocketContext;

use midnight_connector::connector::MidnightConnectorSettings;
use treasury::{start, treasury_engine::TreasuryEngineSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = utils::config::get_config_from_env::<TreasuryEngineSettings>().expect("Failed to load settings.");
    let midnight_connector_settings =
        utils::config::get_config_from_env::<MidnightConnectorSettings>().expect("Failed to load settings.");

    let context = SocketContext::new();
    let api_rx = context.create_pull(&settings.treasury_zmq_pull_address);
    let api_tx = context.create_publisher(&settings.treasury_zmq_publish_address);

    let cli_socket = context.create_response(&settings.treasury_cli_resp_address);

    start(settings, midnight_connector_settings, api_rx, api_tx, cli_socket).await
}

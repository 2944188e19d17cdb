use crate::actions::Action;
use msgs::{cli::Cli as CliMsg, Message};
use serde::{Deserialize, Serialize};
use structopt::StructOpt;
use utils::xzmq::ZmqSocket;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CliSettings {
    pub treasury_cli_resp_address: String,
}

#[derive(StructOpt, Debug)]
#[structopt(name = "aidbridge")]
pub struct Cli {
    #[structopt(subcommand)]
    action: Action,
}

impl Cli {
    pub fn execute(self, socket: ZmqSocket) -> ResponseHandler {
        let msg = self.action.into_request();
        utils::xzmq::send_as_bincode(&socket, &msg);

        ResponseHandler { socket }
    }
}

pub struct ResponseHandler {
    socket: ZmqSocket,
}

impl ResponseHandler {
    pub fn process_response(self) {
        match self.socket.recv_msg(0) {
            Ok(frame) => match bincode::deserialize::<Message>(&frame) {
                Ok(msg) => match msg {
                    Message::Cli(CliMsg::BurnTokensResult(burn_result)) => {
                        println!("Received burn result: {:?}", burn_result);
                    }
                    Message::Cli(CliMsg::TreasuryStateResponse(state)) => {
                        println!("Received treasury state: {:?}", state);
                    }
                    _ => {
                        println!("Received unhandled message: {:?}", msg)
                    }
                },
                Err(err) => {
                    eprintln!("Error while deserializing a payload into message: {:?}", err)
                }
            },
            Err(err) => {
                eprintln!("Error while receiving a message: {:?}", err)
            }
        }
    }
}

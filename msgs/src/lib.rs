use serde::{Deserialize, Serialize};

pub mod api;
pub mod cli;

use api::*;
use cli::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    Api(Api),
    Cli(Cli),
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AidType;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn messages_round_trip_over_bincode() {
        let req_id = Uuid::new_v4();
        let msg = Message::Api(Api::MintAidTokenRequest(MintAidTokenRequest {
            req_id,
            uid: 42,
            recipient_uid: 7,
            amount: dec!(250.5),
            token_type: AidType::Medical,
            restrictions: Some(vec!["medical_supplies".to_string()]),
            expires_at: None,
        }));
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: Message = bincode::deserialize(&bytes).unwrap();
        match decoded {
            Message::Api(Api::MintAidTokenRequest(req)) => {
                assert_eq!(req.req_id, req_id);
                assert_eq!(req.amount, dec!(250.5));
                assert_eq!(req.token_type, AidType::Medical);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}

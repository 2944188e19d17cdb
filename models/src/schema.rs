table! {
    users (uid) {
        uid -> Int4,
        created_at -> Nullable<Timestamp>,
        username -> Text,
        password -> Text,
    }
}

table! {
    profiles (id) {
        id -> Uuid,
        uid -> Int4,
        username -> Nullable<Text>,
        wallet_address -> Nullable<Text>,
        created_at -> Int8,
        updated_at -> Int8,
    }
}

table! {
    aid_requests (id) {
        id -> Uuid,
        uid -> Int4,
        request_type -> Text,
        amount -> Numeric,
        description -> Nullable<Text>,
        location -> Text,
        urgency_level -> Int4,
        need_score -> Int4,
        status -> Text,
        zk_proof_hash -> Nullable<Text>,
        midnight_tx_hash -> Nullable<Text>,
        created_at -> Int8,
        updated_at -> Int8,
    }
}

table! {
    tokens (id) {
        id -> Uuid,
        creator_uid -> Nullable<Int4>,
        name -> Text,
        symbol -> Text,
        supply -> Numeric,
        contract_address -> Nullable<Text>,
        midnight_tx_hash -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Int8,
        updated_at -> Int8,
    }
}

table! {
    aid_tokens (id) {
        id -> Uuid,
        recipient_uid -> Int4,
        token_id -> Text,
        amount -> Numeric,
        token_type -> Text,
        contract_address -> Text,
        midnight_tx_hash -> Nullable<Text>,
        restrictions -> Nullable<Jsonb>,
        expires_at -> Nullable<Int8>,
        is_active -> Bool,
        used_amount -> Numeric,
        created_at -> Int8,
        updated_at -> Int8,
    }
}

table! {
    distributions (id) {
        id -> Uuid,
        aid_request_id -> Uuid,
        distributor_uid -> Int4,
        recipient_uid -> Int4,
        amount -> Numeric,
        token_contract_address -> Nullable<Text>,
        midnight_tx_hash -> Nullable<Text>,
        shielded_memo -> Nullable<Text>,
        status -> Text,
        distributed_at -> Nullable<Int8>,
        created_at -> Int8,
    }
}

table! {
    verifiers (id) {
        id -> Uuid,
        uid -> Int4,
        role -> Text,
        organization -> Nullable<Text>,
        location -> Nullable<Text>,
        midnight_address -> Nullable<Text>,
        reputation_score -> Int4,
        verifications_count -> Int4,
        is_active -> Bool,
        created_at -> Int8,
    }
}

table! {
    verifier_applications (id) {
        id -> Uuid,
        uid -> Int4,
        full_name -> Text,
        motivation -> Text,
        status -> Text,
        zk_verified -> Bool,
        zk_proof_hash -> Nullable<Text>,
        midnight_tx_hash -> Nullable<Text>,
        created_at -> Int8,
        updated_at -> Int8,
    }
}

table! {
    user_verifications (id) {
        id -> Uuid,
        uid -> Int4,
        verifier_id -> Uuid,
        verification_type -> Text,
        zk_proof_hash -> Nullable<Text>,
        midnight_proof_tx -> Nullable<Text>,
        status -> Text,
        metadata -> Nullable<Jsonb>,
        verified_at -> Nullable<Int8>,
        expires_at -> Nullable<Int8>,
        created_at -> Int8,
    }
}

table! {
    midnight_transactions (id) {
        id -> Uuid,
        tx_hash -> Text,
        tx_type -> Text,
        from_address -> Nullable<Text>,
        to_address -> Nullable<Text>,
        amount -> Nullable<Numeric>,
        shielded -> Bool,
        block_height -> Nullable<Int8>,
        gas_used -> Nullable<Int8>,
        status -> Text,
        metadata -> Nullable<Jsonb>,
        created_at -> Int8,
    }
}

table! {
    reports (id) {
        id -> Uuid,
        generated_by -> Int4,
        report_type -> Text,
        title -> Text,
        description -> Nullable<Text>,
        data -> Nullable<Jsonb>,
        date_range_start -> Nullable<Int8>,
        date_range_end -> Nullable<Int8>,
        privacy_level -> Text,
        midnight_hash -> Nullable<Text>,
        created_at -> Int8,
    }
}

joinable!(distributions -> aid_requests (aid_request_id));
joinable!(user_verifications -> verifiers (verifier_id));

allow_tables_to_appear_in_same_query!(
    users,
    profiles,
    aid_requests,
    tokens,
    aid_tokens,
    distributions,
    verifiers,
    verifier_applications,
    user_verifications,
    midnight_transactions,
    reports,
);

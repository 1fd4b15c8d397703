// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the sealed container: any credential list survives a
//! seal/open cycle, and only the sealing passphrase opens it.

use portico_vault::model::Credential;
use portico_vault::{open_records, seal_records};
use proptest::prelude::*;
use secrecy::SecretString;

// Low KDF cost so each case stays cheap.
const TEST_ITERATIONS: u32 = 1_000;

fn arb_credential() -> impl Strategy<Value = Credential> {
    (
        ".{0,40}",
        proptest::option::of(".{0,20}"),
        proptest::collection::vec("[a-z]{1,8}@[a-z]{1,8}\\.[a-z]{2,3}", 0..3),
        ".{0,30}",
        ".{0,40}",
    )
        .prop_map(|(website, username, emails, password, note)| Credential {
            website,
            username,
            emails,
            password,
            note,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn seal_open_preserves_every_record(
        records in proptest::collection::vec(arb_credential(), 0..8),
        pass in ".{1,32}",
    ) {
        let passphrase = SecretString::from(pass);
        let container = seal_records(&passphrase, &records, TEST_ITERATIONS).unwrap();
        let json = container.to_json().unwrap();

        let (reopened, report) = open_records(&passphrase, &json, TEST_ITERATIONS).unwrap();
        prop_assert_eq!(reopened, records);
        prop_assert_eq!(report.migrated, 0);
    }

    #[test]
    fn different_passphrase_never_opens(
        records in proptest::collection::vec(arb_credential(), 0..4),
        pass in "[a-z]{4,16}",
        other in "[A-Z]{4,16}",
    ) {
        let container = seal_records(&SecretString::from(pass), &records, TEST_ITERATIONS).unwrap();
        let json = container.to_json().unwrap();

        let err = open_records(&SecretString::from(other), &json, TEST_ITERATIONS).unwrap_err();
        prop_assert!(err.to_string().contains("unlock failed"));
    }
}

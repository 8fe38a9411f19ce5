//! # Circuit Inputs
//!
//! The named input mapping handed to a prover: signal name to an ordered
//! array of decimal-string limbs. Built fresh for every prove attempt.
//!
//! JSON form matches what circom-style witness generators consume:
//!
//! ```json
//! { "signature": ["3582320600048169363", "..."], "modulus": ["..."] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Signal name to decimal-string limbs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitInputs(BTreeMap<String, Vec<String>>);

impl CircuitInputs {
    /// Start an empty builder.
    pub fn builder() -> CircuitInputBuilder {
        CircuitInputBuilder::default()
    }

    /// Limbs of `signal`, if present.
    pub fn get(&self, signal: &str) -> Option<&[String]> {
        self.0.get(signal).map(Vec::as_slice)
    }

    /// Insert or replace a signal, returning the previous limbs.
    pub fn insert(&mut self, signal: impl Into<String>, limbs: Vec<String>) -> Option<Vec<String>> {
        self.0.insert(signal.into(), limbs)
    }

    /// Signal names in sorted order.
    pub fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of signals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no signal is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The fixed RSA-2048 signature input set for the
    /// [`rsa_2048`](crate::CircuitLayout::rsa_2048) layout.
    pub fn rsa_2048_example() -> Self {
        Self::builder()
            .signal("signature", RSA_SIGNATURE)
            .signal("modulus", RSA_MODULUS)
            .signal("base_message", RSA_BASE_MESSAGE)
            .build()
    }
}

/// Assembles [`CircuitInputs`] one signal at a time.
#[derive(Debug, Default)]
pub struct CircuitInputBuilder {
    inputs: CircuitInputs,
}

impl CircuitInputBuilder {
    /// Set `signal` to `limbs`. A later call for the same name wins.
    pub fn signal<I, S>(mut self, signal: impl Into<String>, limbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs
            .insert(signal, limbs.into_iter().map(Into::into).collect());
        self
    }

    /// Set `signal` from native integers.
    pub fn signal_u64<I>(self, signal: impl Into<String>, limbs: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.signal(signal, limbs.into_iter().map(|v| v.to_string()))
    }

    /// Finish.
    pub fn build(self) -> CircuitInputs {
        self.inputs
    }
}

const RSA_SIGNATURE: [&str; 32] = [
    "3582320600048169363",
    "7163546589759624213",
    "18262551396327275695",
    "4479772254206047016",
    "1970274621151677644",
    "6547632513799968987",
    "921117808165172908",
    "7155116889028933260",
    "16769940396381196125",
    "17141182191056257954",
    "4376997046052607007",
    "17471823348423771450",
    "16282311012391954891",
    "70286524413490741",
    "1588836847166444745",
    "15693430141227594668",
    "13832254169115286697",
    "15936550641925323613",
    "323842208142565220",
    "6558662646882345749",
    "15268061661646212265",
    "14962976685717212593",
    "15773505053543368901",
    "9586594741348111792",
    "1455720481014374292",
    "13945813312010515080",
    "6352059456732816887",
    "17556873002865047035",
    "2412591065060484384",
    "11512123092407778330",
    "8499281165724578877",
    "12768005853882726493",
];

const RSA_MODULUS: [&str; 32] = [
    "13792647154200341559",
    "12773492180790982043",
    "13046321649363433702",
    "10174370803876824128",
    "7282572246071034406",
    "1524365412687682781",
    "4900829043004737418",
    "6195884386932410966",
    "13554217876979843574",
    "17902692039595931737",
    "12433028734895890975",
    "15971442058448435996",
    "4591894758077129763",
    "11258250015882429548",
    "16399550288873254981",
    "8246389845141771315",
    "14040203746442788850",
    "7283856864330834987",
    "12297563098718697441",
    "13560928146585163504",
    "7380926829734048483",
    "14591299561622291080",
    "8439722381984777599",
    "17375431987296514829",
    "16727607878674407272",
    "3233954801381564296",
    "17255435698225160983",
    "15093748890170255670",
    "15810389980847260072",
    "11120056430439037392",
    "5866130971823719482",
    "13327552690270163501",
];

const RSA_BASE_MESSAGE: [&str; 32] = [
    "18114495772705111902",
    "2254271930739856077",
    "2068851770",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CircuitLayout;

    #[test]
    fn builder_replaces_repeated_signal() {
        let inputs = CircuitInputs::builder()
            .signal("a", ["1"])
            .signal("a", ["2", "3"])
            .build();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs.get("a").unwrap(), ["2", "3"]);
    }

    #[test]
    fn signal_u64_formats_decimal() {
        let inputs = CircuitInputs::builder()
            .signal_u64("a", [0, u64::MAX])
            .build();
        assert_eq!(inputs.get("a").unwrap(), ["0", "18446744073709551615"]);
    }

    #[test]
    fn json_form_is_a_plain_map() {
        let inputs = CircuitInputs::builder().signal("m", ["7"]).build();
        let json = serde_json::to_string(&inputs).unwrap();
        assert_eq!(json, r#"{"m":["7"]}"#);
        let back: CircuitInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inputs);
    }

    #[test]
    fn rsa_example_fits_rsa_layout() {
        let inputs = CircuitInputs::rsa_2048_example();
        assert_eq!(inputs.len(), 3);
        let assigned = CircuitLayout::rsa_2048().assign(&inputs).unwrap();
        assert_eq!(assigned.limbs().len(), 96);
        assert_eq!(assigned.public_inputs().len(), 33);
    }

    #[test]
    fn empty_inputs() {
        let inputs = CircuitInputs::default();
        assert!(inputs.is_empty());
        assert_eq!(inputs.signal_names().count(), 0);
        assert!(inputs.get("signature").is_none());
    }
}

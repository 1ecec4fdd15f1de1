//! The case driver.
//!
//! Runs the fixed, linear sequence of steps: greet the entity, print the
//! sum, build the three-element sequence and read the probe position.
//! The driver never recovers from a bounds violation. In
//! [`FaultMode::Panic`] the read panics; in [`FaultMode::Error`] the
//! violation is returned to the caller.

use crate::arith::add;
use crate::config::{Config, FaultMode};
use crate::entity::Person;
use crate::error::CaseError;
use crate::sequence::FixedSeq;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info};

/// Number of elements in the case sequence.
pub const SEQ_LEN: usize = 3;

/// Everything needed to run the case, validated from a [`Config`].
#[derive(Debug, Clone)]
pub struct Driver {
    person: Person,
    lhs: i64,
    rhs: i64,
    seq: FixedSeq<i64, SEQ_LEN>,
    probe_index: usize,
    mode: FaultMode,
}

/// Details of a bounds violation as recorded in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub index: usize,
    pub len: usize,
    pub message: String,
}

impl Fault {
    /// Extract the fault details from a bounds violation.
    pub fn from_error(err: &CaseError) -> Option<Self> {
        err.bounds().map(|(index, len)| Fault {
            index,
            len,
            message: err.to_string(),
        })
    }
}

/// What the case produced up to (and including the outcome of) the probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Lines written to the case output, in order.
    pub lines: Vec<String>,
    /// Result of the addition step.
    pub sum: i64,
    /// Position read at the end of the case.
    pub probe_index: usize,
    /// Value read, when the probe was in range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// The bounds violation the probe causes, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<Fault>,
}

impl Driver {
    /// Build a driver from configuration.
    pub fn from_config(config: &Config) -> Result<Self, CaseError> {
        let seq = FixedSeq::try_from(config.sequence.values.as_slice())?;

        Ok(Self {
            person: Person::new(config.entity.name.clone()),
            lhs: config.arith.lhs,
            rhs: config.arith.rhs,
            seq,
            probe_index: config.sequence.probe_index,
            mode: config.fault.mode,
        })
    }

    pub fn mode(&self) -> FaultMode {
        self.mode
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn operands(&self) -> (i64, i64) {
        (self.lhs, self.rhs)
    }

    pub fn sequence(&self) -> &FixedSeq<i64, SEQ_LEN> {
        &self.seq
    }

    pub fn probe_index(&self) -> usize {
        self.probe_index
    }

    /// Run the greeting and addition steps and pre-check the probe.
    ///
    /// The pre-check uses a non-faulting lookup, so the returned outcome
    /// already describes the fault [`Driver::probe`] is about to raise.
    pub fn prelude<W: Write>(&self, out: &mut W) -> Result<RunOutcome, CaseError> {
        let mut outcome = RunOutcome {
            probe_index: self.probe_index,
            ..Default::default()
        };

        debug!("Greeting {}", self.person.name());
        self.person.greet(out)?;
        outcome.lines.push(self.person.greeting());

        outcome.sum = add(self.lhs, self.rhs);
        let line = format!("The result of Add is: {}", outcome.sum);
        writeln!(out, "{}", line)?;
        outcome.lines.push(line);

        // Everything above must reach the terminal before the probe faults.
        out.flush()?;

        match self.seq.at(self.probe_index) {
            Ok(value) => outcome.value = Some(*value),
            Err(e) => outcome.fault = Fault::from_error(&e),
        }

        Ok(outcome)
    }

    /// Read the probe position and write the element.
    ///
    /// # Panics
    ///
    /// In [`FaultMode::Panic`], panics when the probe is out of range.
    pub fn probe<W: Write>(&self, out: &mut W) -> Result<i64, CaseError> {
        info!(
            "Reading position {} of a sequence of length {}",
            self.probe_index,
            self.seq.len()
        );

        let value = match self.mode {
            FaultMode::Panic => self.seq[self.probe_index],
            FaultMode::Error => *self.seq.at(self.probe_index)?,
        };

        writeln!(out, "{}", value)?;
        out.flush()?;
        Ok(value)
    }

    /// Run every step of the case.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunOutcome, CaseError> {
        let mut outcome = self.prelude(out)?;
        let value = self.probe(out)?;
        outcome.lines.push(value.to_string());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_with(probe_index: usize, mode: FaultMode) -> Driver {
        let mut config = Config::default();
        config.sequence.probe_index = probe_index;
        config.fault.mode = mode;
        Driver::from_config(&config).unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_prelude_output_order() {
        let driver = Driver::from_config(&Config::default()).unwrap();
        let mut buf = Vec::new();
        let outcome = driver.prelude(&mut buf).unwrap();

        assert_eq!(output(buf), "Hello, Alice!\nThe result of Add is: 30\n");
        assert_eq!(outcome.sum, 30);
        assert_eq!(outcome.value, None);
        assert_eq!(
            outcome.fault,
            Some(Fault {
                index: 5,
                len: 3,
                message: "index out of range [5] with length 3".to_string(),
            })
        );
    }

    #[test]
    fn test_error_mode_propagates_bounds_violation() {
        let driver = driver_with(5, FaultMode::Error);
        let mut buf = Vec::new();
        let err = driver.run(&mut buf).unwrap_err();

        assert_eq!(err.bounds(), Some((5, 3)));
        // Nothing is printed for the failed read.
        assert_eq!(output(buf), "Hello, Alice!\nThe result of Add is: 30\n");
    }

    #[test]
    #[should_panic(expected = "index out of range [5] with length 3")]
    fn test_panic_mode_panics() {
        let driver = driver_with(5, FaultMode::Panic);
        let _ = driver.run(&mut Vec::<u8>::new());
    }

    #[test]
    fn test_in_range_probes_succeed() {
        for (index, expected) in [(0, 1), (1, 2), (2, 3)] {
            for mode in [FaultMode::Panic, FaultMode::Error] {
                let driver = driver_with(index, mode);
                let mut buf = Vec::new();
                let outcome = driver.run(&mut buf).unwrap();

                assert_eq!(outcome.value, Some(expected));
                assert_eq!(outcome.fault, None);
                assert_eq!(outcome.lines.last(), Some(&expected.to_string()));
                assert!(output(buf).ends_with(&format!("{}\n", expected)));
            }
        }
    }

    #[test]
    fn test_rejects_wrong_sequence_length() {
        let mut config = Config::default();
        config.sequence.values = vec![1, 2, 3, 4];
        let err = Driver::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            CaseError::InvalidSequence {
                expected: 3,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_custom_entity_and_operands() {
        let mut config = Config::default();
        config.entity.name = "Bob".to_string();
        config.arith.lhs = -5;
        config.arith.rhs = 5;
        let driver = Driver::from_config(&config).unwrap();
        let mut buf = Vec::new();
        let outcome = driver.prelude(&mut buf).unwrap();

        assert_eq!(outcome.sum, 0);
        assert_eq!(output(buf), "Hello, Bob!\nThe result of Add is: 0\n");
    }
}

use std::fmt;

use serde::Serialize;

use super::MalformedInstance;

/// Machine identifier checked against the instance's machine count.
///
/// Stored zero-based so it can index per-machine tables directly, but shown and
/// serialized 1-based like in the benchmark files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u64")]
pub struct MachineId(usize);

impl MachineId {
    /// Checks a 1-based id from a benchmark file against the machine count.
    pub fn from_number(
        number: u64,
        machines: usize,
        job: usize,
        step: usize,
    ) -> Result<Self, MalformedInstance> {
        match usize::try_from(number) {
            Ok(number) if (1..=machines).contains(&number) => Ok(Self(number - 1)),
            _ => Err(MalformedInstance::MachineOutOfRange {
                job,
                step,
                machine: number,
                machines,
            }),
        }
    }

    /// Zero-based index, for per-machine tables.
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based number, as written in benchmark files.
    pub fn number(self) -> u64 {
        self.0 as u64 + 1
    }

    /// All machine ids of an instance with `machines` machines.
    pub fn all(machines: usize) -> impl Iterator<Item = MachineId> {
        (0..machines).map(MachineId)
    }
}

impl From<MachineId> for u64 {
    fn from(machine: MachineId) -> Self {
        machine.number()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::MachineId;
    use crate::instance::MalformedInstance;

    #[test]
    fn numbers_are_one_based() {
        let machine = MachineId::from_number(3, 3, 0, 0).unwrap();

        assert_eq!(machine.index(), 2);
        assert_eq!(machine.number(), 3);
        assert_eq!(machine.to_string(), "M3");
    }

    #[test]
    fn out_of_range_numbers_fail() {
        for number in [0, 4] {
            assert_eq!(
                MachineId::from_number(number, 3, 1, 2),
                Err(MalformedInstance::MachineOutOfRange {
                    job: 1,
                    step: 2,
                    machine: number,
                    machines: 3,
                })
            );
        }
    }

    #[test]
    fn all_lists_every_machine() {
        let numbers: Vec<u64> = MachineId::all(3).map(MachineId::number).collect();

        assert_eq!(numbers, vec![1, 2, 3]);
    }
}

//! Rule table for B3/S23.

/// Next-state lookup indexed by `alive * 9 + neighbor_count`.
///
/// Counts above 8 never occur while the neighbor invariant holds.
pub struct RuleTable {
    table: [bool; 18],
}

impl RuleTable {
    pub const fn new() -> Self {
        let mut table = [false; 18];
        let mut count = 0;
        while count <= 8 {
            table[count] = output_for(false, count as u8);
            table[9 + count] = output_for(true, count as u8);
            count += 1;
        }
        Self { table }
    }

    #[inline(always)]
    pub fn next_alive(&self, alive: bool, neighbor_count: u8) -> bool {
        self.table[(alive as usize) * 9 + neighbor_count as usize]
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared instance; the table never changes.
pub static LIFE: RuleTable = RuleTable::new();

const fn output_for(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

#[cfg(test)]
mod tests {
    use super::LIFE;

    #[test]
    fn births_only_on_three() {
        for count in 0..=8u8 {
            assert_eq!(LIFE.next_alive(false, count), count == 3, "count {count}");
        }
    }

    #[test]
    fn survives_on_two_or_three() {
        for count in 0..=8u8 {
            assert_eq!(
                LIFE.next_alive(true, count),
                count == 2 || count == 3,
                "count {count}"
            );
        }
    }
}

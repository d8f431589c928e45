use crate::options::ChestMenuOption;

/// Lower bound for an unbounded storage's reported capacity.
pub const UNBOUNDED_CAPACITY_FLOOR: u32 = 70;

/// Effective slot count of a storage.
///
/// `resize` and `requested` are the resolved `resize_chest` and
/// `resize_chest_capacity` options, `item_count` the occupied slots and
/// `natural` what the entity reports on its own. With resizing disabled the
/// natural capacity is returned untouched; otherwise the result never drops
/// below `item_count`.
pub fn effective_capacity(
    resize: ChestMenuOption,
    requested: i32,
    item_count: u32,
    natural: u32,
) -> u32 {
    if resize == ChestMenuOption::Disabled {
        return natural;
    }

    let capacity = match requested {
        r if r < 0 => item_count.saturating_add(1).max(UNBOUNDED_CAPACITY_FLOOR),
        0 => natural,
        r => r.unsigned_abs(),
    };
    capacity.max(item_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_keeps_one_free_slot_above_the_floor() {
        assert_eq!(effective_capacity(ChestMenuOption::Large, -1, 5, 36), 70);
        assert_eq!(effective_capacity(ChestMenuOption::Large, -1, 75, 36), 76);
    }

    #[test]
    fn explicit_capacity_never_strands_items() {
        assert_eq!(effective_capacity(ChestMenuOption::Medium, 12, 20, 36), 20);
        assert_eq!(effective_capacity(ChestMenuOption::Medium, 12, 5, 36), 12);
    }

    #[test]
    fn zero_uses_the_natural_capacity() {
        assert_eq!(effective_capacity(ChestMenuOption::Small, 0, 3, 36), 36);
        assert_eq!(effective_capacity(ChestMenuOption::Small, 0, 40, 36), 40);
    }

    #[test]
    fn disabled_resizing_reports_natural_capacity_unmodified() {
        assert_eq!(effective_capacity(ChestMenuOption::Disabled, -1, 5, 36), 36);
        assert_eq!(effective_capacity(ChestMenuOption::Disabled, 120, 5, 9), 9);
    }

    #[test]
    fn capacity_is_never_below_item_count_when_enabled() {
        let menus = [
            ChestMenuOption::Default,
            ChestMenuOption::Small,
            ChestMenuOption::Medium,
            ChestMenuOption::Large,
        ];
        for menu in menus {
            for requested in [-50, -1, 0, 1, 12, 70, 500] {
                for count in [0, 1, 11, 12, 69, 70, 71, 600] {
                    for natural in [0, 9, 36, 70] {
                        let capacity = effective_capacity(menu, requested, count, natural);
                        assert!(
                            capacity >= count,
                            "{menu} requested={requested} count={count} natural={natural}"
                        );
                    }
                }
            }
        }
    }
}

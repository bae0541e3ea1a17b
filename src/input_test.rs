#[cfg(test)]
mod tests {
    use super::super::input::*;
    use super::super::types::ResourcePool;

    #[test]
    fn test_parse_plain_and_separated_numbers() {
        assert_eq!(parse_quantity("900"), 900);
        assert_eq!(parse_quantity("12,500"), 12_500);
        assert_eq!(parse_quantity(" 62 000 "), 62_000);
        assert_eq!(parse_quantity("1_800"), 1_800);
    }

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(parse_quantity("1.5k"), 1_500);
        assert_eq!(parse_quantity("62K"), 62_000);
        assert_eq!(parse_quantity("2m"), 2_000_000);
        assert_eq!(parse_quantity("1g"), 1_000_000_000);
    }

    #[test]
    fn test_parse_full_width_input() {
        assert_eq!(parse_quantity("３Ｍ"), 3_000_000);
        assert_eq!(parse_quantity("１２，５００"), 12_500);
    }

    #[test]
    fn test_parse_floors_fractions() {
        assert_eq!(parse_quantity("7.9"), 7);
        assert_eq!(parse_quantity("0.4k"), 400);
        assert_eq!(parse_quantity("1.2345k"), 1_234);
    }

    #[test]
    fn test_parse_invalid_becomes_zero() {
        for raw in ["", "   ", "-5", "-1.5k", "abc", "nan", "NaN", "inf", "k", "12x"] {
            assert_eq!(parse_quantity(raw), 0, "{:?} should parse to 0", raw);
        }
    }

    #[test]
    fn test_parse_saturates_huge_values() {
        assert_eq!(parse_quantity("99999999999999999999g"), u64::MAX);
    }

    #[test]
    fn test_quantity_from_f64() {
        assert_eq!(quantity_from_f64(12.9), 12);
        assert_eq!(quantity_from_f64(-3.0), 0);
        assert_eq!(quantity_from_f64(f64::NAN), 0);
        assert_eq!(quantity_from_f64(f64::INFINITY), 0);
        assert_eq!(quantity_from_f64(1e30), u64::MAX);
    }

    #[test]
    fn test_normalize_inventory() {
        let fields = vec![
            ("diamonds", "62k"),
            ("speedup_general", "1,800"),
            ("hammer", "-4"),
            ("crystals", "500"),
        ];
        let inv = normalize_inventory(fields);

        assert_eq!(inv.get(ResourcePool::Diamonds), 62_000);
        assert_eq!(inv.get(ResourcePool::SpeedupGeneral), 1_800);
        assert_eq!(inv.get(ResourcePool::Hammers), 0);
        assert_eq!(inv.get(ResourcePool::Stamina), 0);
    }
}

#[cfg(test)]
mod tests {
    use super::super::error::PlannerError;
    use super::super::projection::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_schedule_prices() {
        let schedule = SlotPriceSchedule::default();
        let prices: Vec<u64> = (1..=9).map(|i| schedule.price(i)).collect();
        assert_eq!(prices, vec![0, 50, 50, 50, 200, 200, 200, 1000, 1000]);
        assert_eq!(schedule.cumulative(7), 750);
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_schedule_cumulative_matches_slot_sum() {
        let bounded = SlotPriceSchedule {
            steps: vec![
                PriceStep { slots: Some(2), price: 10 },
                PriceStep { slots: Some(2), price: 30 },
            ],
        };
        for schedule in [SlotPriceSchedule::default(), bounded] {
            for slots in 0..=20 {
                let summed: u64 = (1..=slots).map(|i| schedule.price(i)).sum();
                assert_eq!(schedule.cumulative(slots), summed, "{} slots", slots);
            }
        }
    }

    #[test]
    fn test_huge_target_saturates_without_iterating() {
        let projection = project_cost(u64::MAX, 0, 1, &SlotPriceSchedule::default());

        assert_eq!(projection.needed, u64::MAX);
        assert_eq!(projection.per_day.len(), 1);
        assert_eq!(projection.per_day[0].slots, u64::MAX);
        assert_eq!(projection.total_cost, u64::MAX);

        let spread = project_cost(u64::MAX, 0, 6, &SlotPriceSchedule::default());
        assert_eq!(spread.per_day.len(), 6);
        assert_eq!(spread.total_cost, u64::MAX);
    }

    #[test]
    fn test_full_event_cost() {
        let projection = project_cost(51, 9, 6, &SlotPriceSchedule::default());

        assert_eq!(projection.needed, 42);
        assert_eq!(projection.per_day.len(), 6);
        assert!(projection.per_day.iter().all(|d| d.slots == 7 && d.cost == 750));
        assert_eq!(projection.total_cost, 4500);
        assert_eq!(projection.unscheduled, 0);
    }

    #[test]
    fn test_remainder_goes_to_first_days() {
        let projection = project_cost(20, 9, 6, &SlotPriceSchedule::default());

        assert_eq!(projection.needed, 11);
        let slots: Vec<u64> = projection.per_day.iter().map(|d| d.slots).collect();
        assert_eq!(slots, vec![2, 2, 2, 2, 2, 1]);
        assert_eq!(projection.total_cost, 5 * 50);
    }

    #[test]
    fn test_free_quests_cover_target() {
        let projection = project_cost(5, 9, 6, &SlotPriceSchedule::default());

        assert_eq!(projection.needed, 0);
        assert_eq!(projection.total_cost, 0);
        assert!(projection.per_day.iter().all(|d| d.slots == 0));
    }

    #[test]
    fn test_zero_days_leaves_slots_unscheduled() {
        let projection = project_cost(51, 9, 0, &SlotPriceSchedule::default());

        assert!(projection.per_day.is_empty());
        assert_eq!(projection.total_cost, 0);
        assert_eq!(projection.unscheduled, 42);
    }

    #[test]
    fn test_closure_pricing() {
        let flat = |_slot: u64| 100u64;
        let projection = project_cost(15, 0, 3, &flat);

        assert_eq!(projection.total_cost, 1500);
    }

    #[test]
    fn test_schedule_validation() {
        let decreasing = SlotPriceSchedule {
            steps: vec![
                PriceStep { slots: Some(2), price: 200 },
                PriceStep { slots: None, price: 50 },
            ],
        };
        assert!(matches!(decreasing.validate(), Err(PlannerError::InvalidConfig(_))));

        let open_middle = SlotPriceSchedule {
            steps: vec![
                PriceStep { slots: None, price: 50 },
                PriceStep { slots: Some(1), price: 100 },
            ],
        };
        assert!(open_middle.validate().is_err());

        let empty = SlotPriceSchedule { steps: vec![] };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_bounded_schedule_repeats_last_price() {
        let schedule = SlotPriceSchedule {
            steps: vec![
                PriceStep { slots: Some(1), price: 0 },
                PriceStep { slots: Some(1), price: 80 },
            ],
        };
        assert_eq!(schedule.price(5), 80);
    }

    #[test]
    fn test_schedule_json_format() {
        let schedule: SlotPriceSchedule =
            serde_json::from_str(r#"[{"slots": 1, "price": 0}, {"price": 300}]"#).unwrap();

        assert_eq!(schedule.steps.len(), 2);
        assert_eq!(schedule.steps[1].slots, None);
        assert_eq!(schedule.price(4), 300);
    }

    #[test]
    fn test_pace_tiers() {
        let free = recommend_pace(9, 6);
        assert_eq!(free.tier, PaceTier::FreeOnly);
        assert_eq!(free.quests_per_day, dec!(1.5));
        assert_eq!(free.daily_diamonds, dec!(0));

        let cheap = recommend_pace(24, 6);
        assert_eq!(cheap.tier, PaceTier::CheapSlots);
        assert_eq!(cheap.daily_diamonds, dec!(150));

        let mid = recommend_pace(45, 6);
        assert_eq!(mid.tier, PaceTier::MidSlots);
        assert_eq!(mid.daily_diamonds, dec!(750));

        let premium = recommend_pace(51, 6);
        assert_eq!(premium.tier, PaceTier::PremiumSlots);
        assert_eq!(premium.quests_per_day, dec!(8.5));
        assert_eq!(premium.daily_diamonds, dec!(2250));
    }

    #[test]
    fn test_pace_rounding_and_zero_days() {
        let advice = recommend_pace(10, 3);
        assert_eq!(advice.quests_per_day, dec!(3.33));
        assert_eq!(advice.tier, PaceTier::CheapSlots);

        let none = recommend_pace(51, 0);
        assert_eq!(none.tier, PaceTier::FreeOnly);
        assert_eq!(none.quests_per_day, dec!(0));
    }
}

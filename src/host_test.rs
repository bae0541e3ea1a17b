#[cfg(test)]
mod tests {
    use super::super::allocation::{FillMode, allocate};
    use super::super::catalog::QuestCatalog;
    use super::super::config::PlannerConfig;
    use super::super::error::PlannerError;
    use super::super::feasibility::quest_availability;
    use super::super::gap::{Filler, gap, gap_with};
    use super::super::host::*;
    use super::super::inventory::Inventory;
    use super::super::store::{JsonFileStore, MemoryStore, Store};
    use super::super::types::{QuestTypeId, Rank, ResourcePool};

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set("inventory.diamonds", "62000");
        store.set("inventory.speedup_general", "1.8k");
        store.set("inventory.hammers", "garbage");
        store.set("target", "3");
        store
    }

    #[test]
    fn test_session_loads_inventory_and_target() {
        let session = Session::load(seeded_store(), PlannerConfig::default());

        assert_eq!(session.inventory().get(ResourcePool::Diamonds), 62_000);
        assert_eq!(session.inventory().get(ResourcePool::SpeedupGeneral), 1_800);
        assert_eq!(session.inventory().get(ResourcePool::Hammers), 0);
        assert_eq!(session.target(), 3);
    }

    #[test]
    fn test_missing_target_uses_config() {
        let session = Session::load(MemoryStore::new(), PlannerConfig::default());

        assert_eq!(session.target(), 51);
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn test_set_field_writes_through() {
        let mut session = Session::load(MemoryStore::new(), PlannerConfig::default());

        assert_eq!(session.set_field("diamonds", "15k").unwrap(), 15_000);
        assert_eq!(session.set_field("target", "36").unwrap(), 36);
        assert_eq!(session.set_field("speedup_troop_mins", "900").unwrap(), 900);

        let store = session.into_store();
        assert_eq!(store.get("inventory.diamonds").as_deref(), Some("15000"));
        assert_eq!(store.get("inventory.speedup_troop").as_deref(), Some("900"));
        assert_eq!(store.get(TARGET_KEY).as_deref(), Some("36"));
    }

    #[test]
    fn test_set_field_rejects_unknown_key() {
        let mut session = Session::load(MemoryStore::new(), PlannerConfig::default());

        let result = session.set_field("gold_bars", "10");
        assert!(matches!(result, Err(PlannerError::UnknownPool(_))));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_override_target_is_not_persisted() {
        let mut session = Session::load(seeded_store(), PlannerConfig::default());
        session.override_target(10);

        assert_eq!(session.target(), 10);
        assert_eq!(session.store().get(TARGET_KEY).as_deref(), Some("3"));
    }

    #[test]
    fn test_session_plan_report() {
        let session = Session::load(seeded_store(), PlannerConfig::default());
        let report = session.plan(&QuestCatalog::standard());

        assert_eq!(report.target, 3);
        assert_eq!(report.plan.total_quests, 3);
        assert!(report.gap.is_closed());
        assert_eq!(report.cost.needed, 0);
        assert!(!report.above_advisory_max);
        // the report passes through JSON for the --json output
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"total_quests\":3"));
    }

    #[test]
    fn test_report_flags_target_above_advisory_max() {
        let mut session = Session::load(MemoryStore::new(), PlannerConfig::default());
        session.set_target("70");
        let report = session.plan(&QuestCatalog::standard());

        assert!(report.above_advisory_max);
        assert_eq!(report.gap.missing, 70);
    }

    #[test]
    fn test_plan_board_drops_stale_results() {
        let session = Session::load(seeded_store(), PlannerConfig::default());
        let catalog = QuestCatalog::standard();
        let mut board = PlanBoard::new();

        let older = board.next_generation();
        let newer = board.next_generation();

        assert!(board.publish(newer, session.plan(&catalog)));
        assert!(!board.publish(older, session.plan(&catalog)));
        assert_eq!(board.shown_generation(), newer);
        assert!(board.latest().is_some());
    }

    #[test]
    fn test_gap_proposals() {
        let inv = Inventory::new().with(ResourcePool::Hammers, 10);
        let plan = allocate(&inv, &QuestCatalog::standard(), 4);

        let report = gap(&plan, 4);
        assert_eq!(report.missing, 3);
        let points: Vec<u64> = report.proposals.iter().map(|p| p.potential_points).collect();
        assert_eq!(points, vec![900, 720, 3150]);

        let custom = gap_with(&plan, 4, &[Filler::new("arena", "Arena", 100, true)]);
        assert_eq!(custom.proposals.len(), 1);
        assert_eq!(custom.proposals[0].potential_points, 300);

        let closed = gap(&plan, 1);
        assert!(closed.is_closed());
        assert!(closed.proposals.is_empty());
    }

    #[test]
    fn test_quest_availability_split_and_order() {
        let inv = Inventory::new()
            .with(ResourcePool::SpeedupTroop, 600)
            .with(ResourcePool::SpeedupGeneral, 1_200);
        let availability = quest_availability(&inv, &QuestCatalog::standard());

        let troop = QuestTypeId::new("speedup_troop");
        let general = QuestTypeId::new("speedup_general");
        let troop_costs: Vec<u64> = availability
            .possible
            .iter()
            .filter(|a| a.quest_type == troop)
            .map(|a| a.variant.cost)
            .collect();
        assert_eq!(troop_costs, vec![900, 1800]);

        let general_costs: Vec<u64> = availability
            .possible
            .iter()
            .filter(|a| a.quest_type == general)
            .map(|a| a.variant.cost)
            .collect();
        assert_eq!(general_costs, vec![900]);

        let ranks: Vec<Rank> = availability.possible.iter().map(|a| a.variant.rank).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
        assert!(availability.impossible.iter().all(|a| !a.affordable));
    }

    #[test]
    fn test_json_file_store_persists() {
        let path = std::env::temp_dir().join(format!(
            "mobilization_store_{}.json",
            std::process::id()
        ));
        std::fs::remove_file(&path).ok();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(TARGET_KEY), None);
        store.set(TARGET_KEY, "24");
        store.set(&inventory_key(ResourcePool::Stamina), "300");
        store.flush().unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(reopened.get(TARGET_KEY).as_deref(), Some("24"));
        assert_eq!(reopened.get("inventory.stamina").as_deref(), Some("300"));
    }

    #[test]
    fn test_json_file_store_reads_bare_numbers() {
        let path = std::env::temp_dir().join(format!(
            "mobilization_numeric_store_{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"inventory.diamonds": 62000, "inventory.stamina": 12.7, "inventory.hammers": -4, "inventory.hero_shards": null, "target": 3}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(store.get("inventory.diamonds").as_deref(), Some("62000"));

        let session = Session::load(store, PlannerConfig::default());
        assert_eq!(session.inventory().get(ResourcePool::Diamonds), 62_000);
        assert_eq!(session.inventory().get(ResourcePool::Stamina), 12);
        assert_eq!(session.inventory().get(ResourcePool::Hammers), 0);
        assert_eq!(session.inventory().get(ResourcePool::HeroShards), 0);
        assert_eq!(session.target(), 3);
    }

    #[test]
    fn test_config_defaults_and_validation() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_presets, vec![24, 36, 51]);
        assert!(config.exceeds_advisory_max(64));
        assert!(!config.exceeds_advisory_max(63));

        let no_days = PlannerConfig {
            event_days: 0,
            ..PlannerConfig::default()
        };
        assert!(matches!(no_days.validate(), Err(PlannerError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_file_round_trip() {
        let config = PlannerConfig {
            target: 36,
            fill_mode: FillMode::Unconstrained,
            ..PlannerConfig::default()
        };

        for name in ["config.yaml", "config.json"] {
            let path = std::env::temp_dir().join(format!(
                "mobilization_{}_{}",
                std::process::id(),
                name
            ));
            config.save_to_file(&path).unwrap();
            let loaded = PlannerConfig::load_from_file(&path).unwrap();
            std::fs::remove_file(&path).ok();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: PlannerConfig =
            serde_yaml::from_str("event_days: 7\nfill_mode: unconstrained\n").unwrap();

        assert_eq!(config.event_days, 7);
        assert_eq!(config.fill_mode, FillMode::Unconstrained);
        assert_eq!(config.free_quests, 9);
        assert_eq!(config.fillers.len(), 3);
    }
}

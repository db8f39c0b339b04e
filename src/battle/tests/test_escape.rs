#[cfg(test)]
mod tests {
    use crate::battle::engine::{BattleEngine, PlayerAction};
    use crate::battle::state::{BattleEvent, BattlePhase, EndReason, RandomValues};
    use crate::battle::tests::common::{
        create_test_battle, default_enemy, default_player, no_crit_rolls, rng_with, sample_data,
    };
    use crate::config::{BattleConfig, EscapeConfig};
    use pretty_assertions::assert_eq;
    use schema::GhostType;

    fn escape_roll(roll: f64) -> RandomValues {
        RandomValues {
            escape: Some(roll),
            ..no_crit_rolls()
        }
    }

    #[test]
    fn test_successful_escape() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(&engine, default_player().build(), default_enemy().build());

        // 0.5 + (60 - 40) / 100 = 0.7
        let result = engine.execute_player_action(
            &mut state,
            &PlayerAction::Escape,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(escape_roll(0.69)),
        );

        let attempt = result.escape.expect("escape was attempted");
        assert!(attempt.success);
        assert!((attempt.rate - 0.7).abs() < 1e-9);
        assert_eq!(result.end_reason, Some(EndReason::Escape));
        assert_eq!(state.phase, BattlePhase::Result);
        assert_eq!(state.escape_attempts, 1);
        assert_eq!(result.messages, vec!["Got away safely!"]);
        assert_eq!(state.player.current_hp, 40);
    }

    #[test]
    fn test_failed_escape_raises_next_rate() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(&engine, default_player().build(), default_enemy().build());

        let first = engine.execute_player_action(
            &mut state,
            &PlayerAction::Escape,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(escape_roll(0.75)),
        );
        assert!(first.events.contains(&BattleEvent::EscapeFailed));
        assert!(first.messages.contains(&"Can't escape!".to_string()));
        assert_eq!(state.escape_attempts, 1);
        assert_eq!(state.player.current_hp, 31);
        assert_eq!(state.phase, BattlePhase::CommandSelect);

        // One failed attempt adds 0.1.
        let second = engine.execute_player_action(
            &mut state,
            &PlayerAction::Escape,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(escape_roll(0.75)),
        );
        let attempt = second.escape.expect("escape was attempted");
        assert!((attempt.rate - 0.8).abs() < 1e-9);
        assert!(attempt.success);
        assert_eq!(state.escape_attempts, 2);
    }

    #[test]
    fn test_configured_escape_tuning() {
        let data = sample_data();
        let config = BattleConfig {
            escape: EscapeConfig {
                min_rate: 0.0,
                max_rate: 0.0,
                ..EscapeConfig::default()
            },
            ..BattleConfig::default()
        };
        let engine = BattleEngine::new(&data).with_config(config);
        let mut state = create_test_battle(&engine, default_player().build(), default_enemy().build());

        let result = engine.execute_player_action(
            &mut state,
            &PlayerAction::Escape,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(escape_roll(0.0)),
        );

        assert_eq!(result.escape.map(|e| e.success), Some(false));
    }
}

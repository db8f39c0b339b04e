#[cfg(test)]
mod tests {
    use crate::battle::ai::StrongestMove;
    use crate::battle::engine::{BattleEngine, PlayerAction};
    use crate::battle::state::{BattleEvent, BattlePhase, RandomValues, Side, StatType};
    use crate::battle::tests::common::{
        create_test_battle, default_enemy, default_player, no_crit_rolls, rng_with, sample_data,
        TestGhostBuilder,
    };
    use pretty_assertions::assert_eq;
    use schema::GhostType;

    const TACKLE: PlayerAction = PlayerAction::Attack { move_index: 0 };

    #[test]
    fn test_faster_player_attacks_first_and_both_deal_damage() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(&engine, default_player().build(), default_enemy().build());
        let mut rng = rng_with(no_crit_rolls());

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng,
        );

        // Tackle from a fire ghost: no STAB, 6 damage.
        // Tackle from a normal ghost: STAB, floor(6 * 1.5) = 9.
        assert_eq!(
            result.events,
            vec![
                BattleEvent::TurnStarted { turn_number: 1 },
                BattleEvent::MoveUsed {
                    side: Side::Player,
                    move_name: "Tackle".to_string()
                },
                BattleEvent::AttackTypeEffectiveness { multiplier: 1.0 },
                BattleEvent::DamageDealt {
                    target: Side::Enemy,
                    damage: 6,
                    remaining_hp: 34
                },
                BattleEvent::MoveUsed {
                    side: Side::Enemy,
                    move_name: "Tackle".to_string()
                },
                BattleEvent::AttackTypeEffectiveness { multiplier: 1.0 },
                BattleEvent::DamageDealt {
                    target: Side::Player,
                    damage: 9,
                    remaining_hp: 31
                },
            ]
        );
        assert_eq!(
            result.messages,
            vec![
                "Emberling used Tackle!",
                "The wild Hushling took 6 damage!",
                "The wild Hushling used Tackle!",
                "Emberling took 9 damage!",
            ]
        );

        let order = result.turn_order.expect("attacks resolve a turn order");
        assert_eq!(order.first, Side::Player);
        assert!(!order.was_speed_tie);
        assert_eq!(result.player_damage.map(|d| d.damage), Some(6));
        assert_eq!(result.enemy_damage.map(|d| d.damage), Some(9));
        assert!(!result.battle_ended);
        assert_eq!(state.phase, BattlePhase::CommandSelect);
    }

    #[test]
    fn test_messages_accumulate_on_battle_state() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(&engine, default_player().build(), default_enemy().build());
        assert_eq!(state.messages, vec!["A wild Hushling appeared!", "Go, Emberling!"]);

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(no_crit_rolls()),
        );

        assert_eq!(state.messages.len(), 2 + result.messages.len());
        assert_eq!(state.messages[2..], result.messages[..]);
    }

    #[test]
    fn test_attack_spends_pp_on_battle_snapshot() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(&engine, default_player().build(), default_enemy().build());

        engine.execute_player_action(
            &mut state,
            &PlayerAction::Attack { move_index: 1 },
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(no_crit_rolls()),
        );

        assert_eq!(state.player.ghost.moves[1].current_pp, 24);
        assert_eq!(state.player.ghost.moves[0].current_pp, 35);
        assert_eq!(state.enemy.ghost.moves[0].current_pp, 34);
    }

    #[test]
    fn test_stab_and_critical_hit() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(&engine, default_player().build(), default_enemy().build());
        let mut rng = rng_with(RandomValues {
            player_critical: Some(0.0),
            ..no_crit_rolls()
        });

        let result = engine.execute_player_action(
            &mut state,
            &PlayerAction::Attack { move_index: 1 },
            GhostType::Fire,
            GhostType::Normal,
            &mut rng,
        );

        // Ember: STAB 9, critical floor(9 * 1.5) = 13.
        let damage = result.player_damage.expect("player attacked");
        assert!(damage.is_critical);
        assert_eq!(damage.damage, 13);
        assert!(result
            .events
            .contains(&BattleEvent::CriticalHit { attacker: Side::Player }));
        assert!(result.messages.contains(&"A critical hit!".to_string()));
        assert_eq!(state.enemy.current_hp, 27);
    }

    #[test]
    fn test_immune_target_takes_no_damage() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(
            &engine,
            default_player().build(),
            TestGhostBuilder::new("wisp", 10)
                .with_stats(50, 50, 40)
                .with_move("lick", 30)
                .build(),
        );
        let mut rng = rng_with(RandomValues {
            player_critical: Some(0.0),
            ..no_crit_rolls()
        });

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Ghost,
            &mut rng,
        );

        let damage = result.player_damage.expect("player attacked");
        assert_eq!(damage.damage, 0);
        assert!(!damage.is_critical);
        assert_eq!(state.enemy.current_hp, 40);
        assert!(result.messages.contains(&"It had no effect!".to_string()));
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::DamageDealt { target: Side::Enemy, .. })));
    }

    #[test]
    fn test_slower_player_acts_second() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(
            &engine,
            default_player().with_stats(50, 50, 30).build(),
            default_enemy().build(),
        );

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(no_crit_rolls()),
        );

        assert_eq!(result.turn_order.map(|o| o.first), Some(Side::Enemy));
        assert_eq!(result.messages[0], "The wild Hushling used Tackle!");
    }

    #[test]
    fn test_speed_tie_uses_roll() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(
            &engine,
            default_player().with_stats(50, 50, 40).build(),
            default_enemy().build(),
        );
        let mut rng = rng_with(RandomValues {
            speed_tie: Some(0.7),
            ..no_crit_rolls()
        });

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng,
        );

        let order = result.turn_order.expect("attacks resolve a turn order");
        assert!(order.was_speed_tie);
        assert_eq!(order.first, Side::Enemy);
    }

    #[test]
    fn test_speed_stages_change_turn_order() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(
            &engine,
            default_player().with_stats(50, 50, 30).build(),
            default_enemy().build(),
        );
        // 30 at +2 is 60, faster than 40.
        state.player.apply_stat_modifier(StatType::Speed, 2);

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(no_crit_rolls()),
        );

        assert_eq!(result.turn_order.map(|o| o.first), Some(Side::Player));
    }

    #[test]
    fn test_enemy_without_moves_skips_its_action() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(
            &engine,
            default_player().build(),
            TestGhostBuilder::new("hushling", 10).with_stats(50, 50, 40).build(),
        );

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(no_crit_rolls()),
        );

        assert!(result
            .events
            .contains(&BattleEvent::NoUsableMove { side: Side::Enemy }));
        assert_eq!(state.player.current_hp, 40);
        assert_eq!(result.enemy_damage, None);
    }

    #[test]
    fn test_enemy_with_depleted_moves_still_uses_first_slot() {
        let data = sample_data();
        let engine = BattleEngine::new(&data);
        let mut state = create_test_battle(
            &engine,
            default_player().build(),
            TestGhostBuilder::new("hushling", 10)
                .with_stats(50, 50, 40)
                .with_move_pp("tackle", 0, 35)
                .with_move_pp("quick_attack", 0, 30)
                .build(),
        );

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Fire,
            GhostType::Normal,
            &mut rng_with(RandomValues {
                enemy_move: Some(0.9),
                ..no_crit_rolls()
            }),
        );

        assert!(result.messages.contains(&"The wild Hushling used Tackle!".to_string()));
        assert_eq!(state.enemy.ghost.moves[0].current_pp, 0);
        assert_eq!(state.player.current_hp, 31);
    }

    #[test]
    fn test_custom_strategy_picks_strongest_move() {
        let data = sample_data();
        let engine = BattleEngine::new(&data).with_strategy(StrongestMove);
        let mut state = create_test_battle(
            &engine,
            TestGhostBuilder::new("sproutle", 10)
                .with_stats(50, 50, 60)
                .with_move("tackle", 35)
                .build(),
            TestGhostBuilder::new("emberling", 10)
                .with_stats(50, 50, 40)
                .with_move("tackle", 35)
                .with_move("ember", 25)
                .build(),
        );

        let result = engine.execute_player_action(
            &mut state,
            &TACKLE,
            GhostType::Grass,
            GhostType::Fire,
            &mut rng_with(no_crit_rolls()),
        );

        assert!(result.messages.contains(&"The wild Emberling used Ember!".to_string()));
        assert!(result.messages.contains(&"It's super effective!".to_string()));
        // Ember: STAB 9, doubled against grass to 18.
        assert_eq!(result.enemy_damage.map(|d| d.damage), Some(18));
    }
}

//! Unit tests for rail-dispatch.

use rail_core::{Direction, Priority, SimClock, SimConfig, SimTime, TrackId, TrainId};
use rail_track::TrackLayout;
use rail_train::{Route, RoutePhase, Train, TrainStore};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn layout() -> TrackLayout {
    TrackLayout::standard().unwrap()
}

fn train(number: &str, direction: Direction, priority: Priority, x: f64) -> Train {
    Train::new(number, number, direction, priority, 130.0, x)
}

fn store(trains: Vec<Train>) -> TrainStore {
    let mut store = TrainStore::new();
    for t in trains {
        store.add(t).unwrap();
    }
    store
}

const A: TrainId = TrainId(0);
const B: TrainId = TrainId(1);
const C: TrainId = TrainId(2);

// ── Policy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policies {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("aggressive".parse::<Policy>().unwrap(), Policy::Aggressive);
        assert_eq!("Conservative".parse::<Policy>().unwrap(), Policy::Conservative);
        assert_eq!("no-wrong-line".parse::<Policy>().unwrap(), Policy::NoWrongLine);
        assert_eq!("NoWrongLine".parse::<Policy>().unwrap(), Policy::NoWrongLine);
        assert!(matches!("reckless".parse::<Policy>(), Err(DispatchError::UnknownPolicy(_))));
        for p in Policy::ALL {
            assert_eq!(p.to_string().parse::<Policy>().unwrap(), p);
        }
    }

    #[test]
    fn only_no_wrong_line_forbids_bypass() {
        assert_eq!(Policy::default(), Policy::Aggressive);
        assert!(Policy::Aggressive.allows_wrong_line());
        assert!(Policy::Conservative.allows_wrong_line());
        assert!(!Policy::NoWrongLine.allows_wrong_line());
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planning {
    use super::*;

    fn plan(layout: &TrackLayout, trains: &TrainStore, policy: Policy) -> Result<CorridorChoice, PlanRefusal> {
        let config = SimConfig::default();
        plan_corridor(&DispatchContext::new(layout, trains, policy, &config), A)
    }

    #[test]
    fn no_failure_means_no_plan() {
        let trains = store(vec![train("1", Direction::Up, Priority::High, 300.0)]);
        assert_eq!(plan(&layout(), &trains, Policy::Aggressive), Err(PlanRefusal::NoFailureAhead));
    }

    #[test]
    fn up_train_takes_left_corridor() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![train("1", Direction::Up, Priority::High, 300.0)]);
        let choice = plan(&layout, &trains, Policy::Aggressive).unwrap();
        assert_eq!(
            choice,
            CorridorChoice {
                via:          TrackId::Down,
                corridor:     "left".into(),
                entry:        360.0,
                exit:         440.0,
                failed_block: 1,
            }
        );
    }

    #[test]
    fn down_train_enters_at_upper_end() {
        let mut layout = layout();
        layout.fail_block(TrackId::Down, 1).unwrap();
        let trains = store(vec![train("1", Direction::Down, Priority::High, 700.0)]);
        let choice = plan(&layout, &trains, Policy::Aggressive).unwrap();
        assert_eq!(choice.corridor, "left");
        assert_eq!(choice.via, TrackId::Up);
        assert_eq!(choice.entry, 440.0);
        assert_eq!(choice.exit, 360.0);
    }

    #[test]
    fn train_inside_failed_block_takes_first_candidate() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 0).unwrap();
        let trains = store(vec![train("1", Direction::Up, Priority::High, 300.0)]);
        let choice = plan(&layout, &trains, Policy::Aggressive).unwrap();
        assert_eq!(choice.failed_block, 0);
        assert_eq!(choice.corridor, "left");
        assert_eq!(choice.entry, 360.0);
    }

    #[test]
    fn candidate_entered_inside_failure_is_still_first() {
        let mut layout = layout();
        layout.fail_block(TrackId::Down, 2).unwrap();
        let trains = store(vec![train("1", Direction::Down, Priority::High, 900.0)]);
        let choice = plan(&layout, &trains, Policy::Aggressive).unwrap();
        // `mid` is entered at 640, within the failed block [560, 800).
        assert_eq!(choice.corridor, "mid");
        assert_eq!(choice.via, TrackId::Up);
        assert_eq!(choice.entry, 640.0);
        assert_eq!(choice.exit, 520.0);
        assert_eq!(choice.failed_block, 2);
    }

    #[test]
    fn nearest_failure_follows_direction_of_travel() {
        let mut layout = layout();
        layout.fail_block(TrackId::Down, 0).unwrap();
        layout.fail_block(TrackId::Down, 2).unwrap();
        layout.fail_block(TrackId::Up, 1).unwrap();
        layout.fail_block(TrackId::Up, 3).unwrap();

        let down = train("1", Direction::Down, Priority::High, 900.0);
        assert_eq!(nearest_failure_ahead(&layout, &down), Some(2));
        let up = train("2", Direction::Up, Priority::High, 200.0);
        assert_eq!(nearest_failure_ahead(&layout, &up), Some(1));
        let past = train("3", Direction::Up, Priority::High, 600.0);
        assert_eq!(nearest_failure_ahead(&layout, &past), Some(3));
        let inside = train("4", Direction::Up, Priority::High, 450.0);
        assert_eq!(nearest_failure_ahead(&layout, &inside), Some(1));
    }

    #[test]
    fn occupied_corridor_is_unsafe() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![
            train("1", Direction::Up, Priority::High, 300.0),
            train("2", Direction::Down, Priority::Low, 440.0),
        ]);
        assert_eq!(plan(&layout, &trains, Policy::Aggressive), Err(PlanRefusal::NoSafeCorridor));
    }

    #[test]
    fn failed_via_block_is_unsafe() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        layout.fail_block(TrackId::Down, 1).unwrap();
        let trains = store(vec![train("1", Direction::Up, Priority::High, 300.0)]);
        assert_eq!(plan(&layout, &trains, Policy::Aggressive), Err(PlanRefusal::NoSafeCorridor));
    }

    #[test]
    fn passed_entry_is_unreachable() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![train("1", Direction::Up, Priority::High, 380.0)]);
        assert_eq!(plan(&layout, &trains, Policy::Aggressive), Err(PlanRefusal::NoSafeCorridor));
    }

    #[test]
    fn platform_loop_has_no_opposite_line() {
        let mut layout = layout();
        layout.fail_block(TrackId::Mid1, 0).unwrap();
        let trains = store(vec![train("1", Direction::Up, Priority::Medium, 510.0).on_track(TrackId::Mid1)]);
        assert_eq!(
            plan(&layout, &trains, Policy::Aggressive),
            Err(PlanRefusal::NoOppositeTrack(TrackId::Mid1))
        );
    }

    #[test]
    fn no_wrong_line_never_plans_a_route() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![train("1", Direction::Up, Priority::High, 300.0)]);
        assert_eq!(plan(&layout, &trains, Policy::NoWrongLine), Err(PlanRefusal::PolicyForbids));
        assert!(plan(&layout, &trains, Policy::Conservative).is_ok());
    }

    #[test]
    fn detouring_and_unknown_trains_are_refused() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let mut t = train("1", Direction::Up, Priority::High, 300.0);
        t.route = Some(Route::new(TrackId::Down, "left", 360.0, 440.0));
        let trains = store(vec![t]);
        assert_eq!(
            plan(&layout, &trains, Policy::Aggressive),
            Err(PlanRefusal::AlreadyOnDetour("1".into()))
        );

        let config = SimConfig::default();
        let ctx = DispatchContext::new(&layout, &trains, Policy::Aggressive, &config);
        assert!(matches!(plan_corridor(&ctx, TrainId(9)), Err(PlanRefusal::UnknownTrain(_))));
    }

    #[test]
    fn install_route_starts_in_pre() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let mut trains = store(vec![train("1", Direction::Up, Priority::High, 300.0)]);
        let choice = plan(&layout, &trains, Policy::Aggressive).unwrap();
        assert!(install_route(&mut trains, A, &choice));
        assert!(!install_route(&mut trains, TrainId(5), &choice));
        let route = trains.get(A).unwrap().route.clone().unwrap();
        assert_eq!(route.phase, RoutePhase::Pre);
        assert_eq!(route.via, TrackId::Down);
        assert!(route.active);
    }
}

// ── Detector ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod detection {
    use super::*;

    fn eval(layout: &TrackLayout, trains: &TrainStore, policy: Policy) -> Option<Recommendation> {
        let config = SimConfig::default();
        evaluate(&DispatchContext::new(layout, trains, policy, &config))
    }

    #[test]
    fn quiet_corridor_is_all_clear() {
        let trains = store(vec![
            train("12001", Direction::Up, Priority::High, 180.0),
            train("22177", Direction::Up, Priority::Medium, 510.0).on_track(TrackId::Mid1),
            train("9F201", Direction::Down, Priority::Medium, 630.0).on_track(TrackId::Mid2),
        ]);
        assert!(eval(&layout(), &trains, Policy::Aggressive).is_none());
    }

    #[test]
    fn crossover_holds_second_found_train() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![
            train("12001", Direction::Up, Priority::High, 300.0),
            train("22177", Direction::Up, Priority::Medium, 530.0).on_track(TrackId::Mid1),
            train("9F201", Direction::Down, Priority::Medium, 600.0).on_track(TrackId::Mid2),
        ]);
        let rec = eval(&layout, &trains, Policy::Aggressive).unwrap();
        // The crossover short-circuits the failure planning.
        assert_eq!(rec.plans, vec![Plan::Hold { trains: vec![C], reason: HoldReason::Crossover }]);
        assert_eq!(
            rec.text,
            "Potential conflict detected at mid crossover between 22177 and 9F201. \
             Recommend holding 9F201 until 22177 clears the corridor."
        );
    }

    #[test]
    fn crossover_upper_bound_is_exclusive() {
        let trains = store(vec![
            train("1", Direction::Up, Priority::Medium, 530.0).on_track(TrackId::Mid1),
            train("2", Direction::Down, Priority::Medium, 640.0).on_track(TrackId::Mid2),
        ]);
        assert!(eval(&layout(), &trains, Policy::Aggressive).is_none());
    }

    #[test]
    fn equal_priority_ranks_closer_train_first() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![
            train("far", Direction::Up, Priority::Medium, 250.0),
            train("near", Direction::Up, Priority::Medium, 350.0),
        ]);
        let config = SimConfig::default();
        let ctx = DispatchContext::new(&layout, &trains, Policy::Aggressive, &config);
        let block = layout.block(TrackId::Up, 1).unwrap();
        let ranked: Vec<_> = crate::detector::approaching(&ctx, TrackId::Up, block).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ranked, vec![B, A]);

        let rec = eval(&layout, &trains, Policy::NoWrongLine).unwrap();
        assert_eq!(
            rec.plans,
            vec![Plan::Hold {
                trains: vec![B, A],
                reason: HoldReason::BeforeFailure { track: TrackId::Up, block: 1 },
            }]
        );
        assert_eq!(rec.text, "Hold near, far before UP Blk2.");
    }

    #[test]
    fn higher_priority_beats_distance() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![
            train("near", Direction::Up, Priority::Medium, 350.0),
            train("far", Direction::Up, Priority::High, 200.0),
        ]);
        let config = SimConfig::default();
        let ctx = DispatchContext::new(&layout, &trains, Policy::Aggressive, &config);
        let block = layout.block(TrackId::Up, 1).unwrap();
        assert_eq!(crate::detector::approaching(&ctx, TrackId::Up, block)[0].0, B);
    }

    #[test]
    fn threshold_and_direction_limit_approach() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![
            // 230 away.
            train("1", Direction::Up, Priority::High, 170.0),
            // Already past the failure.
            train("2", Direction::Up, Priority::High, 600.0),
            // Wrong track.
            train("3", Direction::Down, Priority::High, 300.0),
        ]);
        assert!(eval(&layout, &trains, Policy::Aggressive).is_none());
    }

    #[test]
    fn failure_ahead_of_high_priority_train_proposes_reroute() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![
            train("12001", Direction::Up, Priority::High, 300.0),
            train("22177", Direction::Up, Priority::Medium, 200.0),
            train("19345", Direction::Down, Priority::High, 980.0),
        ]);
        let rec = eval(&layout, &trains, Policy::Aggressive).unwrap();
        assert_eq!(
            rec.plans,
            vec![Plan::Reroute {
                lead:     A,
                via:      TrackId::Down,
                corridor: "left".into(),
                holds:    vec![B],
            }]
        );
        assert_eq!(rec.text, "Reroute 12001 via down line through left corridor; hold 22177.");
        assert_eq!(
            rec.note,
            "Justification: minimize total delay using corridor bypasses where safe; \
             respect priorities (Aggressive policy)."
        );
        assert_eq!(rec.policy, Policy::Aggressive);
    }

    #[test]
    fn no_wrong_line_degrades_to_hold() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![train("12001", Direction::Up, Priority::High, 300.0)]);
        let rec = eval(&layout, &trains, Policy::NoWrongLine).unwrap();
        assert!(rec.plans.iter().all(|p| !p.is_reroute()));
        assert_eq!(rec.text, "Hold 12001 before UP Blk2.");
    }

    #[test]
    fn detouring_train_is_not_approaching() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let mut t = train("12001", Direction::Up, Priority::High, 300.0);
        t.route = Some(Route::new(TrackId::Down, "left", 360.0, 440.0));
        let trains = store(vec![t]);
        assert!(eval(&layout, &trains, Policy::Aggressive).is_none());
    }

    #[test]
    fn simultaneous_failures_concatenate() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        layout.fail_block(TrackId::Down, 2).unwrap();
        let trains = store(vec![
            train("12001", Direction::Up, Priority::High, 300.0),
            train("19345", Direction::Down, Priority::High, 900.0),
        ]);
        let rec = eval(&layout, &trains, Policy::Aggressive).unwrap();
        assert_eq!(rec.plans.len(), 2);
        assert_eq!(
            rec.plans[1],
            Plan::Reroute { lead: B, via: TrackId::Up, corridor: "right".into(), holds: vec![] }
        );
        assert_eq!(
            rec.text,
            "Reroute 12001 via down line through left corridor; hold none. \
             Reroute 19345 via up line through right corridor; hold none."
        );
    }

    #[test]
    fn evaluation_never_mutates() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let trains = store(vec![train("12001", Direction::Up, Priority::High, 300.0)]);
        let before = trains.get(A).unwrap().clone();
        eval(&layout, &trains, Policy::Aggressive).unwrap();
        assert_eq!(trains.get(A).unwrap(), &before);
    }
}

// ── Apply ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod applying {
    use super::*;

    #[test]
    fn crossover_hold_uses_manual_duration() {
        let layout = layout();
        let config = SimConfig::default();
        let mut trains = store(vec![
            train("22177", Direction::Up, Priority::Medium, 530.0).on_track(TrackId::Mid1),
            train("9F201", Direction::Down, Priority::Medium, 600.0).on_track(TrackId::Mid2),
        ]);
        let rec = evaluate(&DispatchContext::new(&layout, &trains, Policy::Aggressive, &config)).unwrap();

        let actions = apply(&rec, &layout, &mut trains, &SimClock::new(), &config);
        assert_eq!(actions, vec![DispatchAction::Held { trains: vec![B], reason: HoldReason::Crossover }]);
        let held = trains.get(B).unwrap();
        assert!(held.is_held());
        assert_eq!(held.hold_until, Some(SimTime(90_000)));
        assert!(!trains.get(A).unwrap().is_held());
    }

    #[test]
    fn reroute_installs_route_and_holds_followers() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let config = SimConfig { speed_multiplier: 2.0, ..SimConfig::default() };
        let mut trains = store(vec![
            train("12001", Direction::Up, Priority::High, 300.0),
            train("22177", Direction::Up, Priority::Medium, 200.0),
        ]);
        let rec = evaluate(&DispatchContext::new(&layout, &trains, Policy::Aggressive, &config)).unwrap();

        let actions = apply(&rec, &layout, &mut trains, &SimClock::new(), &config);
        assert_eq!(
            actions,
            vec![DispatchAction::Rerouted { lead: A, corridor: "left".into(), holds: vec![B] }]
        );

        let lead = trains.get(A).unwrap();
        let route = lead.route.as_ref().unwrap();
        assert_eq!(route.phase, RoutePhase::Pre);
        assert_eq!((route.entry, route.exit), (360.0, 440.0));
        assert!(!lead.is_held());

        // 120 s at double speed.
        assert_eq!(trains.get(B).unwrap().hold_until, Some(SimTime(60_000)));
    }

    #[test]
    fn failure_hold_uses_dispatch_duration() {
        let mut layout = layout();
        layout.fail_block(TrackId::Up, 1).unwrap();
        let config = SimConfig::default();
        let mut trains = store(vec![train("12001", Direction::Up, Priority::High, 300.0)]);
        let rec = evaluate(&DispatchContext::new(&layout, &trains, Policy::NoWrongLine, &config)).unwrap();

        apply(&rec, &layout, &mut trains, &SimClock::new(), &config);
        let t = trains.get(A).unwrap();
        assert_eq!(t.hold_until, Some(SimTime(120_000)));
        assert!(t.route.is_none());
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let layout = layout();
        let config = SimConfig::default();
        let mut trains = store(vec![train("1", Direction::Up, Priority::High, 300.0)]);
        let rec = Recommendation {
            text:   String::new(),
            note:   String::new(),
            policy: Policy::Aggressive,
            plans:  vec![
                Plan::Hold { trains: vec![TrainId(4), A], reason: HoldReason::Crossover },
                Plan::Reroute { lead: A, via: TrackId::Down, corridor: "nowhere".into(), holds: vec![] },
            ],
        };
        let actions = apply(&rec, &layout, &mut trains, &SimClock::new(), &config);
        assert_eq!(actions, vec![DispatchAction::Held { trains: vec![A], reason: HoldReason::Crossover }]);
        assert!(trains.get(A).unwrap().route.is_none());
    }
}

use maze_core::search::death_trap_directions;
use maze_core::{Action, Agent, Cell, DecisionEvent, Direction, Mode, PolicyConfig, Snapshot};

fn layout(rows: &[&str]) -> Snapshot {
    Snapshot::from_ascii(&rows.join("\n")).expect("scenario layout should parse")
}

fn modes(agent: &Agent) -> Vec<Mode> {
    agent
        .memory()
        .log()
        .iter()
        .filter_map(|event| match event {
            DecisionEvent::Decision { mode, .. } => Some(*mode),
            _ => None,
        })
        .collect()
}

#[test]
fn agent_walks_straight_to_visible_food() {
    let mut snapshot = layout(&[
        "%%%%%%%", //
        "%    .%",
        "%     %",
        "%P    %",
        "%%%%%%%",
    ]);
    let mut agent = Agent::new(PolicyConfig::with_seed(7)).unwrap();

    for tick in 0..6 {
        let action = agent.get_action(&snapshot).unwrap();
        assert!(matches!(action, Action::Move(_)), "tick {tick} should move, got {action:?}");
        snapshot = snapshot.advanced(action);
    }

    assert_eq!(snapshot.agent, Cell::new(5, 3));
    assert!(snapshot.food.is_empty());
    assert_eq!(modes(&agent), vec![Mode::Foraging; 6]);
}

#[test]
fn agent_never_steps_toward_an_adjacent_adversary() {
    let snapshot = layout(&[
        "%%%%%%%", //
        "%     %",
        "%     %",
        "%  P G%",
        "%     %",
        "%     %",
        "%%%%%%%",
    ]);
    for seed in 0..32 {
        let mut agent = Agent::new(PolicyConfig::with_seed(seed)).unwrap();
        let action = agent.get_action(&snapshot).unwrap();
        assert_ne!(action, Action::Move(Direction::East), "seed {seed}");
        assert_eq!(modes(&agent), vec![Mode::Survival]);
    }
}

#[test]
fn dead_end_pocket_is_never_entered_when_wandering() {
    let snapshot = layout(&[
        "%%%%%%%%%%", //
        "%%%      %",
        "%  P     %",
        "%%%      %",
        "%%%%%%%%%%",
    ]);
    let trapped = death_trap_directions(snapshot.agent, &snapshot.walls, 5).unwrap();
    assert_eq!(trapped.into_iter().collect::<Vec<_>>(), vec![Direction::West]);

    // The first exploration corner is walled in, so the agent wanders.
    for seed in 0..24 {
        let mut agent = Agent::new(PolicyConfig::with_seed(seed)).unwrap();
        let action = agent.get_action(&snapshot).unwrap();
        assert_ne!(action, Action::Move(Direction::West), "seed {seed}");
        assert_ne!(action, Action::Stop, "seed {seed}");
        assert_eq!(modes(&agent), vec![Mode::Fallback]);
    }
}

#[test]
fn empty_maze_is_explored_corner_to_corner() {
    let mut snapshot = layout(&[
        "%%%%%%%", //
        "%     %",
        "%     %",
        "%  P  %",
        "%     %",
        "%     %",
        "%%%%%%%",
    ]);
    let mut agent = Agent::new(PolicyConfig::with_seed(19)).unwrap();
    let corners = [Cell::new(1, 1), Cell::new(5, 1), Cell::new(1, 5), Cell::new(5, 5)];
    let mut visited = Vec::new();

    let first = agent.get_action(&snapshot).unwrap();
    assert_eq!(first, Action::Move(Direction::West));
    snapshot = snapshot.advanced(first);

    for _ in 0..40 {
        if corners.contains(&snapshot.agent) && visited.last() != Some(&snapshot.agent) {
            visited.push(snapshot.agent);
        }
        let action = agent.get_action(&snapshot).unwrap();
        snapshot = snapshot.advanced(action);
    }

    assert_eq!(visited.first(), Some(&Cell::new(1, 1)));
    assert!(visited.len() >= 2, "expected at least two corners, saw {visited:?}");
    assert!(modes(&agent).iter().all(|mode| *mode == Mode::Exploration));
}

#[test]
fn episode_end_forgets_the_previous_maze() {
    let first = layout(&[
        "%%%%%", //
        "%P .%",
        "%%%%%",
    ]);
    let second = layout(&[
        "%%%%%%%", //
        "%     %",
        "%  P  %",
        "%     %",
        "%%%%%%%",
    ]);
    let mut agent = Agent::new(PolicyConfig::default()).unwrap();
    agent.get_action(&first).unwrap();
    assert!(agent.memory().targets().contains(&Cell::new(3, 1)));

    agent.end_episode(&first);
    agent.get_action(&second).unwrap();
    let layout = agent.memory().layout().expect("second maze should be mapped");
    assert_eq!(layout.corners().len(), 4);
    assert_eq!(layout.floor().len(), 15);
    assert!(agent.memory().targets().is_empty());
}

use gridwalk_core::{CellCoord, Command, Event, MapLayout, Pose, Position};
use gridwalk_system_movement::{Movement, MovementInput};
use gridwalk_world::{self as world, query, Map, Player};

const FORWARD: MovementInput = MovementInput {
    forward: true,
    backward: false,
    strafe_left: false,
    strafe_right: false,
    turn_left: false,
    turn_right: false,
};

fn corridor() -> Map {
    // Row 1 is open from column 1 to 6, everything else is wall.
    let layout = MapLayout::new(8, 3);
    let mut bytes = vec![255; 24];
    for column in 1..7 {
        bytes[column + 8] = 0;
    }
    Map::new(bytes, layout).expect("valid map")
}

fn tick(
    player: &mut Player<'_>,
    movement: &mut Movement,
    input: &MovementInput,
    log: &mut Vec<Event>,
) {
    let mut commands = Vec::new();
    movement.handle(input, &mut commands);
    for command in commands {
        world::apply(player, command, log).expect("map bound");
    }
}

#[test]
fn held_forward_walks_until_the_wall() {
    let map = corridor();
    let mut player = Player::new(1.5, 1.5, 1.0, 0.0);
    player.set_map(&map);
    let mut movement = Movement::default();
    let mut log = Vec::new();

    for _ in 0..200 {
        tick(&mut player, &mut movement, &FORWARD, &mut log);
    }

    let pose = query::pose(&player);
    assert_eq!(query::cell_of(&player), Some(CellCoord::new(6, 1)));
    assert!(pose.position.x() > 6.9 && pose.position.x() < 7.0);
    assert_eq!(pose.position.y(), 1.5);
    assert!(matches!(log.last(), Some(Event::MovementBlocked { .. })));

    let entered: Vec<_> = log
        .iter()
        .filter_map(|event| match event {
            Event::CellEntered { cell } => Some(*cell),
            _ => None,
        })
        .collect();
    assert_eq!(
        entered,
        (2..7).map(|column| CellCoord::new(column, 1)).collect::<Vec<_>>()
    );
}

#[test]
fn idle_ticks_leave_pose_untouched() {
    let map = corridor();
    let mut player = Player::new(2.5, 1.5, 1.0, 0.0);
    player.set_map(&map);
    let mut movement = Movement::default();
    let mut log = Vec::new();

    for _ in 0..10 {
        tick(&mut player, &mut movement, &MovementInput::default(), &mut log);
    }

    assert!(log.is_empty());
    assert_eq!(query::pose(&player), Pose::new(2.5, 1.5, 1.0, 0.0));
}

#[test]
fn strafing_into_corridor_wall_is_blocked() {
    let map = corridor();
    let mut player = Player::new(3.5, 1.5, 1.0, 0.0);
    player.set_map(&map);
    let mut movement = Movement::default();
    let mut log = Vec::new();
    let input = MovementInput {
        strafe_right: true,
        ..MovementInput::default()
    };

    for _ in 0..20 {
        tick(&mut player, &mut movement, &input, &mut log);
    }

    assert_eq!(player.position().x(), 3.5);
    assert!(player.position().y() < 2.0);
    assert_eq!(query::cell_of(&player), Some(CellCoord::new(3, 1)));
}

#[test]
fn replaying_the_same_script_is_deterministic() {
    let script = scripted_inputs();
    let first = replay(&script);
    let second = replay(&script);

    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn turning_then_walking_follows_new_facing() {
    let map = Map::filled(MapLayout::default(), 0).expect("valid map");
    let mut player = Player::new(10.5, 10.5, 1.0, 0.0);
    player.set_map(&map);
    let mut movement = Movement::default();
    movement.queue_turn(std::f64::consts::FRAC_PI_2 / player.turn_speed());
    let mut log = Vec::new();

    tick(&mut player, &mut movement, &FORWARD, &mut log);

    let position = player.position();
    assert!((position.x() - 10.5).abs() < 1e-9);
    assert!((position.y() - 10.565).abs() < 1e-9);
    assert!(matches!(log[0], Event::PlayerTurned { .. }));
    assert!(matches!(log[1], Event::PlayerMoved { .. }));
}

fn scripted_inputs() -> Vec<MovementInput> {
    let mut inputs = Vec::new();
    for step in 0..120 {
        inputs.push(MovementInput {
            forward: step % 3 != 0,
            backward: step % 17 == 0,
            strafe_left: step % 5 == 0,
            strafe_right: step % 7 == 0,
            turn_left: step % 11 == 0,
            turn_right: step % 4 == 0,
        });
    }
    inputs
}

fn replay(inputs: &[MovementInput]) -> (Pose, Vec<Event>) {
    let layout = MapLayout::default();
    let mut bytes = vec![0; layout.cell_count().expect("cell count")];
    for row in 0..64 {
        bytes[64 * row] = 200;
        bytes[63 + 64 * row] = 200;
    }
    for (column, row) in [(12, 10), (13, 11), (9, 14), (15, 15)] {
        bytes[column + 64 * row] = 100;
    }
    let map = Map::new(bytes, layout).expect("valid map");
    let mut player = Player::new(12.5, 12.5, 0.0, -1.0);
    player.set_map(&map);
    let mut movement = Movement::default();
    let mut log = Vec::new();

    for input in inputs {
        tick(&mut player, &mut movement, input, &mut log);
    }

    let pose = query::pose(&player);
    assert_ne!(pose.position, Position::new(12.5, 12.5));
    (pose, log)
}

#[test]
fn commands_round_trip_through_apply_order() {
    let map = corridor();
    let mut player = Player::new(1.5, 1.5, 1.0, 0.0);
    player.set_map(&map);
    let mut log = Vec::new();

    for command in [
        Command::Turn { alpha: 0.0 },
        Command::Move {
            length: 0.5,
            sideways: 0.0,
        },
    ] {
        world::apply(&mut player, command, &mut log).expect("map bound");
    }

    assert_eq!(
        log,
        vec![
            Event::PlayerMoved {
                from: Position::new(1.5, 1.5),
                to: Position::new(2.0, 1.5),
            },
            Event::CellEntered {
                cell: CellCoord::new(2, 1),
            },
        ]
    );
}

use grid_snake::game::{
    Direction, GameSession, Position, Snake, SnakeWorld, TurnVerdict, WorldConfig,
};
use rand::{rngs::StdRng, SeedableRng};

fn ten_by_ten(snake: Snake, food: Option<Position>) -> GameSession {
    let config = WorldConfig::small();
    let world = SnakeWorld::from_parts(&config, snake, food, StdRng::seed_from_u64(17)).unwrap();
    GameSession::from_world(&config, world).unwrap()
}

fn one_tick(session: &mut GameSession) {
    let interval = session.clock().interval();
    let report = session.frame(interval).unwrap();
    assert!(report.step.is_some());
}

#[test]
fn moves_one_cell_per_tick() {
    let mut session = ten_by_ten(Snake::new(Position::new(5, 5), Direction::Right), None);

    one_tick(&mut session);

    assert_eq!(session.world().head(), Position::new(6, 5));
    assert_eq!(session.world().segment_count(), 0);
}

#[test]
fn wraps_to_opposite_edge() {
    let mut session = ten_by_ten(Snake::new(Position::new(9, 5), Direction::Right), None);

    one_tick(&mut session);

    assert_eq!(session.world().head(), Position::new(0, 5));
}

#[test]
fn eating_grows_by_one() {
    let mut session = ten_by_ten(
        Snake::new(Position::new(5, 5), Direction::Right),
        Some(Position::new(6, 5)),
    );

    let report = session.frame(0.2).unwrap();

    let step = report.step.unwrap();
    assert!(step.ate_food);
    assert_eq!(step.head, Position::new(6, 5));
    assert_eq!(session.world().segment_count(), 1);
    // Replacement food was placed somewhere else in the same frame
    assert_ne!(session.world().food(), Some(Position::new(6, 5)));
}

#[test]
fn body_follows_previous_head_cells() {
    let mut session = ten_by_ten(
        Snake::with_segments(
            Position::new(5, 5),
            Direction::Right,
            [Position::new(4, 5), Position::new(3, 5)],
        ),
        None,
    );

    one_tick(&mut session);

    assert_eq!(session.world().head(), Position::new(6, 5));
    assert_eq!(
        session.world().segments().collect::<Vec<_>>(),
        vec![Position::new(5, 5), Position::new(4, 5)]
    );
}

#[test]
fn reversal_blocked_only_with_a_body() {
    let mut bodied = ten_by_ten(
        Snake::with_segments(Position::new(5, 5), Direction::Right, [Position::new(4, 5)]),
        None,
    );
    assert_eq!(bodied.request_direction(Direction::Left), TurnVerdict::Reversal);
    one_tick(&mut bodied);
    assert_eq!(bodied.world().direction(), Direction::Right);

    let mut bodiless = ten_by_ten(Snake::new(Position::new(5, 5), Direction::Right), None);
    assert_eq!(bodiless.request_direction(Direction::Left), TurnVerdict::Accepted);
    one_tick(&mut bodiless);
    assert_eq!(bodiless.world().head(), Position::new(4, 5));
}

#[test]
fn first_turn_in_a_tick_wins() {
    let mut session = ten_by_ten(Snake::new(Position::new(5, 5), Direction::Right), None);

    session.request_direction(Direction::Up);
    session.request_direction(Direction::Down);
    one_tick(&mut session);

    assert_eq!(session.world().head(), Position::new(5, 4));

    // The latch is free again on the following tick
    assert!(session.request_direction(Direction::Left).is_accepted());
}

//! Obstacle layout generation
//!
//! Fire rings on even slots, lions on odd slots, with jittered spacing and a
//! random subset patrolling back and forth.

use rand::Rng;

use super::state::Obstacle;
use crate::consts::*;

/// Generate the obstacle course for one round
pub fn generate_obstacles<R: Rng + ?Sized>(rng: &mut R) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(OBSTACLE_COUNT);
    let mut x = FIRST_OBSTACLE_X;

    for i in 0..OBSTACLE_COUNT {
        let obstacle = if i % 2 == 0 {
            Obstacle::fire(x, fire_patrol_speed(rng, i))
        } else {
            Obstacle::animal(x, animal_patrol_speed(rng))
        };
        obstacles.push(obstacle);

        x += OBSTACLE_SPACING + (rng.random::<f32>() * OBSTACLE_SPACING_JITTER).round();
    }

    log::debug!(
        "Generated {} obstacles, course ends at x={}",
        obstacles.len(),
        obstacles.last().map(|o| o.x).unwrap_or(0.0)
    );

    obstacles
}

/// Every 4th slot may hold a patrolling fire ring
fn fire_patrol_speed<R: Rng + ?Sized>(rng: &mut R, index: usize) -> f32 {
    if index % 4 != 0 || !rng.random_bool(FIRE_PATROL_CHANCE) {
        return 0.0;
    }
    let speed = rng.random_range(FIRE_PATROL_MIN_SPEED..FIRE_PATROL_MAX_SPEED);
    if rng.random_bool(0.5) { speed } else { -speed }
}

fn animal_patrol_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if !rng.random_bool(ANIMAL_PATROL_CHANCE) {
        return 0.0;
    }
    let speed = rng.random::<f32>() * ANIMAL_PATROL_MAX_SPEED;
    if rng.random_bool(0.5) { speed } else { -speed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_layout_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        let obstacles = generate_obstacles(&mut rng);

        assert_eq!(obstacles.len(), OBSTACLE_COUNT);
        assert_eq!(obstacles[0].x, FIRST_OBSTACLE_X);

        for (i, o) in obstacles.iter().enumerate() {
            assert!(o.active);
            if i % 2 == 0 {
                assert_eq!(o.kind, ObstacleKind::Fire);
                assert_eq!((o.y, o.width, o.height), (FIRE_Y, FIRE_SIZE, FIRE_SIZE));
            } else {
                assert_eq!(o.kind, ObstacleKind::Animal);
                assert_eq!(
                    (o.y, o.width, o.height),
                    (ANIMAL_Y, ANIMAL_WIDTH, ANIMAL_HEIGHT)
                );
            }
        }
    }

    #[test]
    fn test_spacing_and_speeds_bounded() {
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let obstacles = generate_obstacles(&mut rng);

            for pair in obstacles.windows(2) {
                let gap = pair[1].x - pair[0].x;
                assert!((OBSTACLE_SPACING..=OBSTACLE_SPACING + OBSTACLE_SPACING_JITTER).contains(&gap));
                assert_eq!(gap.fract(), 0.0, "spacing is a whole number of pixels");
            }

            for (i, o) in obstacles.iter().enumerate() {
                match o.kind {
                    ObstacleKind::Fire if i % 4 != 0 => assert_eq!(o.dx, 0.0),
                    ObstacleKind::Fire => {
                        if o.dx != 0.0 {
                            let speed = o.dx.abs();
                            assert!((FIRE_PATROL_MIN_SPEED..FIRE_PATROL_MAX_SPEED).contains(&speed));
                        }
                    }
                    ObstacleKind::Animal => assert!(o.dx.abs() < ANIMAL_PATROL_MAX_SPEED),
                }
            }
        }
    }

    #[test]
    fn test_patrols_occur_across_seeds() {
        let mut fire_patrols = 0;
        let mut animal_patrols = 0;
        for seed in 0..100 {
            let mut rng = Pcg32::seed_from_u64(seed);
            for o in generate_obstacles(&mut rng) {
                if o.is_patrolling() {
                    match o.kind {
                        ObstacleKind::Fire => fire_patrols += 1,
                        ObstacleKind::Animal => animal_patrols += 1,
                    }
                }
            }
        }
        // 4 eligible fire rings at 30% and 7 lions at 50%, over 100 rounds
        assert!(fire_patrols > 60 && fire_patrols < 190, "fire patrols: {fire_patrols}");
        assert!(animal_patrols > 250 && animal_patrols < 450, "animal patrols: {animal_patrols}");
    }
}

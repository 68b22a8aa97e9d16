use scene_geom::Vec2;

use crate::NavPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowStatus {
    Moving,
    Arrived,
}

/// Moves a character along a [`NavPath`] at constant speed, one frame at a time.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: NavPath,
    speed: f32,
    arrival_distance: f32,
    next_index: usize,
}

impl PathFollower {
    pub fn new(path: NavPath, speed: f32, arrival_distance: f32) -> Self {
        Self {
            path,
            speed,
            arrival_distance,
            next_index: 0,
        }
    }

    pub fn path(&self) -> &NavPath {
        &self.path
    }

    /// Waypoint currently being walked towards.
    pub fn next_waypoint(&self) -> Option<Vec2> {
        self.path.points.get(self.next_index).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.next_index >= self.path.points.len()
    }

    /// Advance `position` by `speed * dt` along the remaining waypoints.
    ///
    /// `speed_scale` multiplies the speed for this step (e.g. the perspective scale at the
    /// character's Y).
    pub fn advance(&mut self, position: Vec2, dt: f32, speed_scale: f32) -> (Vec2, FollowStatus) {
        let Some(goal) = self.path.points.last().copied() else {
            return (position, FollowStatus::Arrived);
        };
        if self.is_finished() || position.distance(goal) <= self.arrival_distance {
            self.next_index = self.path.points.len();
            return (position, FollowStatus::Arrived);
        }

        let mut remaining = (self.speed * speed_scale).max(0.0) * dt.max(0.0);
        let mut current = position;
        while self.next_index < self.path.points.len() && remaining > 0.0 {
            let target = self.path.points[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                self.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                self.next_index += 1;
                remaining -= dist;
                continue;
            }

            current += to_target * (remaining / dist);
            break;
        }

        if self.is_finished() || current.distance(goal) <= self.arrival_distance {
            self.next_index = self.path.points.len();
            return (current, FollowStatus::Arrived);
        }
        (current, FollowStatus::Moving)
    }
}

use glam::Vec2;

use crate::geom::segments_intersect;
use crate::state::{Field, Paddle, Puck};

/// Advances the puck by one tick of `dt` seconds, bouncing it off the field's
/// side borders and the two paddle edges.
///
/// Collision detection is continuous: each boundary is tested against the
/// segments swept by the puck's corners, so a fast puck cannot tunnel through
/// a border or paddle within a single tick. The four tests run in a fixed
/// order (left, right, upper, lower); each resolves penetration on its own
/// axis and negates that axis of the velocity.
pub fn step_puck(puck: &mut Puck, field: &Field, upper: &Paddle, lower: &Paddle, dt: f32) {
    let mut next = puck.position + puck.velocity * dt;
    if next == puck.position {
        // No movement, nothing to resolve.
        return;
    }

    let hw = puck.half_width();
    let hh = puck.half_height();

    let cur_left = puck.position.x - hw;
    let cur_right = puck.position.x + hw;
    let cur_top = puck.position.y - hh;
    let cur_bottom = puck.position.y + hh;
    let next_left = next.x - hw;
    let next_right = next.x + hw;
    let next_top = next.y - hh;
    let next_bottom = next.y + hh;

    // Left border, only reachable while moving left.
    let left_a = Vec2::new(field.left(), field.top());
    let left_b = Vec2::new(field.left(), field.bottom());
    if puck.velocity.x < 0.0
        && (segments_intersect(
            Vec2::new(cur_left, cur_top),
            Vec2::new(next_left, next_top),
            left_a,
            left_b,
        ) || segments_intersect(
            Vec2::new(cur_left, cur_bottom),
            Vec2::new(next_left, next_bottom),
            left_a,
            left_b,
        ))
    {
        next.x += field.left() - next_left;
        puck.velocity.x = -puck.velocity.x;
    }

    // Right border.
    let right_a = Vec2::new(field.right(), field.top());
    let right_b = Vec2::new(field.right(), field.bottom());
    if puck.velocity.x > 0.0
        && (segments_intersect(
            Vec2::new(cur_right, cur_top),
            Vec2::new(next_right, next_top),
            right_a,
            right_b,
        ) || segments_intersect(
            Vec2::new(cur_right, cur_bottom),
            Vec2::new(next_right, next_bottom),
            right_a,
            right_b,
        ))
    {
        next.x -= next_right - field.right();
        puck.velocity.x = -puck.velocity.x;
    }

    // Upper paddle's bottom edge guards the top opening.
    let (upper_a, upper_b) = upper.bottom_edge();
    if puck.velocity.y < 0.0
        && (segments_intersect(
            Vec2::new(cur_left, cur_top),
            Vec2::new(next_left, next_top),
            upper_a,
            upper_b,
        ) || segments_intersect(
            Vec2::new(cur_right, cur_top),
            Vec2::new(next_right, next_top),
            upper_a,
            upper_b,
        ))
    {
        next.y += upper_a.y - next_top;
        puck.velocity.y = -puck.velocity.y;
    }

    // Lower paddle's top edge.
    let (lower_a, lower_b) = lower.top_edge();
    if puck.velocity.y > 0.0
        && (segments_intersect(
            Vec2::new(cur_left, cur_bottom),
            Vec2::new(next_left, next_bottom),
            lower_a,
            lower_b,
        ) || segments_intersect(
            Vec2::new(cur_right, cur_bottom),
            Vec2::new(next_right, next_bottom),
            lower_a,
            lower_b,
        ))
    {
        next.y -= next_bottom - lower_a.y;
        puck.velocity.y = -puck.velocity.y;
    }

    puck.position = next;
}

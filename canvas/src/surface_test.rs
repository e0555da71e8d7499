use std::collections::HashSet;

use super::*;
use crate::camera::{Cell, Viewport};
use crate::consts::DEAD_FILL;
use crate::render::{GRID_LINE, execute, render};

fn rect(x: i64, y: i64, size: u32) -> Rect {
    Rect { x, y, width: size, height: size }
}

#[test]
fn new_surface_is_empty() {
    assert!(TextSurface::new().lines().is_empty());
}

#[test]
fn fill_places_glyph_by_cell_index() {
    let mut s = TextSurface::new();
    s.fill_rect(rect(40, 20, 20), ALIVE_FILL).unwrap();
    assert_eq!(s.lines(), vec![String::new(), "  #".to_owned()]);
}

#[test]
fn dead_fill_uses_dead_glyph() {
    let mut s = TextSurface::new();
    s.fill_rect(rect(0, 0, 10), DEAD_FILL).unwrap();
    assert_eq!(s.lines(), vec![".".to_owned()]);
}

#[test]
fn later_fill_overwrites_earlier() {
    let mut s = TextSurface::new();
    s.fill_rect(rect(0, 0, 10), DEAD_FILL).unwrap();
    s.fill_rect(rect(0, 0, 10), ALIVE_FILL).unwrap();
    assert_eq!(s.lines(), vec!["#".to_owned()]);
}

#[test]
fn negative_origin_is_ignored() {
    let mut s = TextSurface::new();
    s.fill_rect(rect(-10, 0, 10), ALIVE_FILL).unwrap();
    assert!(s.lines().is_empty());
}

#[test]
fn stroke_does_not_draw() {
    let mut s = TextSurface::new();
    s.stroke_rect(rect(0, 0, 10), &GRID_LINE).unwrap();
    assert!(s.lines().is_empty());
}

#[test]
fn clear_discards_previous_frame() {
    let mut s = TextSurface::new();
    s.fill_rect(rect(0, 0, 10), ALIVE_FILL).unwrap();
    s.clear(10, 10).unwrap();
    assert!(s.lines().is_empty());
}

#[test]
fn executes_full_render() {
    let viewport = Viewport::new(100, 60, 20);
    let active: HashSet<Cell> = [Cell::new(0, 0), Cell::new(-2, -1), Cell::new(2, 1)].into_iter().collect();

    let mut s = TextSurface::new();
    execute(&render(&active, &viewport), &mut s).unwrap();

    assert_eq!(s.lines(), vec!["#....".to_owned(), "..#..".to_owned(), "....#".to_owned()]);
    assert_eq!(s.to_string(), "#....\n..#..\n....#\n");
}

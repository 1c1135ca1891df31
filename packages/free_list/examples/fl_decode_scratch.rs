//! Decoding a stream of records into pooled scratch structs.
//!
//! The decoded records are only needed briefly, so instead of allocating a fresh target for
//! each one the decoder takes one from a `FreeList` and puts it back when done. The string
//! inside keeps its capacity across uses.

use std::num::ParseIntError;

use free_list::{FreeList, Linked};

#[derive(Default, Linked)]
struct Point {
    x: i32,
    y: i32,
    name: String,
    next: Option<Box<Self>>,
}

impl Point {
    /// Decodes `name x y` into `self`, overwriting the previous contents.
    fn decode_from(&mut self, line: &str) -> Result<(), String> {
        let mut parts = line.split_whitespace();

        let (Some(name), Some(x), Some(y), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected `name x y`, got `{line}`"));
        };

        let parse = |s: &str| s.parse::<i32>().map_err(|e: ParseIntError| e.to_string());

        self.name.push_str(name);
        self.x = parse(x)?;
        self.y = parse(y)?;
        Ok(())
    }
}

fn main() {
    let points = FreeList::builder()
        .factory(|| Box::new(Point::default()))
        .resetter(|point: &mut Point| {
            point.x = 0;
            point.y = 0;
            point.name.clear();
        })
        .build();

    let input = "Pythagoras 3 4\nTreehouse 1782 1841\nbroken line";

    for line in input.lines() {
        let Some(mut point) = points.get() else {
            unreachable!("the factory always produces a point");
        };

        match point.decode_from(line) {
            Ok(()) => println!("{:?}: {{{}, {}}}", point.name, point.x, point.y),
            Err(e) => println!("decode error: {e}"),
        }

        points.put(point);
    }
}

//! Event scripts.
//!
//! One command per line; `#` starts a comment.
//!
//! ```text
//! tool circle
//! color BLUE
//! click 100 100
//! right-click 100 100
//! drag 0 0 300 300
//! key v
//! wait 500
//! ```

use anyhow::{Context, Result, anyhow, bail};
use drawshapes_core::{Color, MouseButton, Point, ShapeKind};
use std::time::Duration;

/// One scripted input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Click { at: Point, button: MouseButton },
    /// Press at `from`, drag to `to`, release.
    Drag { from: Point, to: Point },
    Key(char),
    Tool(ShapeKind),
    Color(Color),
    /// Let running effects play for a while.
    Wait(Duration),
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}: `{}`", i + 1, line))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or_else(|| anyhow!("empty command"))?;
    let args: Vec<&str> = words.collect();

    let step = match (command, args.as_slice()) {
        ("click", [x, y]) => Step::Click {
            at: point(x, y)?,
            button: MouseButton::Left,
        },
        ("right-click", [x, y]) => Step::Click {
            at: point(x, y)?,
            button: MouseButton::Right,
        },
        ("middle-click", [x, y]) => Step::Click {
            at: point(x, y)?,
            button: MouseButton::Middle,
        },
        ("drag", [x1, y1, x2, y2]) => Step::Drag {
            from: point(x1, y1)?,
            to: point(x2, y2)?,
        },
        ("key", [key]) => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Step::Key(c),
                _ => bail!("key must be a single character"),
            }
        }
        ("tool", [name]) => Step::Tool(match *name {
            "square" => ShapeKind::Square,
            "circle" => ShapeKind::Circle,
            "rectangle" => ShapeKind::Rectangle,
            other => bail!("unknown tool `{}`", other),
        }),
        ("color", [token]) => Step::Color(token.parse()?),
        ("wait", [ms]) => {
            let ms: u64 = ms.parse().with_context(|| format!("bad duration `{}`", ms))?;
            Step::Wait(Duration::from_millis(ms))
        }
        (
            "click" | "right-click" | "middle-click" | "drag" | "key" | "tool" | "color" | "wait",
            _,
        ) => bail!("wrong number of arguments"),
        (other, _) => bail!("unknown command `{}`", other),
    };
    Ok(step)
}

fn point(x: &str, y: &str) -> Result<Point> {
    let x = x.parse().with_context(|| format!("bad x coordinate `{}`", x))?;
    let y = y.parse().with_context(|| format!("bad y coordinate `{}`", y))?;
    Ok(Point::new(x, y))
}

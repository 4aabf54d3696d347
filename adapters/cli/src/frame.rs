use snake_autopilot_core::{CellCoord, GridBounds, Path, SnakeView};

const BORDER: char = '#';
const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const PLANNED: char = '.';
const EMPTY: char = ' ';

/// Draws the grid as text, overlaying the planned path beneath the snake and food.
#[must_use]
pub(crate) fn render(bounds: GridBounds, snake: &SnakeView, path: Option<&Path>) -> String {
    let width = usize::try_from(bounds.columns()).unwrap_or(0);
    let mut rows: Vec<Vec<char>> = (0..bounds.rows())
        .map(|_| vec![EMPTY; width])
        .collect();

    let mut paint = |cell: CellCoord, glyph: char| {
        let (Ok(column), Ok(row)) = (usize::try_from(cell.column()), usize::try_from(cell.row()))
        else {
            return;
        };
        if let Some(slot) = rows.get_mut(row).and_then(|line| line.get_mut(column)) {
            *slot = glyph;
        }
    };

    if let Some(path) = path {
        for cell in path.cells().iter().skip(1) {
            paint(*cell, PLANNED);
        }
    }
    if let Some(food) = snake.food() {
        paint(food, FOOD);
    }
    for segment in snake.body().iter().skip(1) {
        paint(*segment, BODY);
    }
    if let Some(head) = snake.head() {
        paint(head, HEAD);
    }

    let edge: String = std::iter::repeat(BORDER).take(width + 2).collect();
    let mut frame = String::with_capacity((width + 3) * (rows.len() + 2));
    frame.push_str(&edge);
    frame.push('\n');
    for line in rows {
        frame.push(BORDER);
        frame.extend(line);
        frame.push(BORDER);
        frame.push('\n');
    }
    frame.push_str(&edge);
    frame
}

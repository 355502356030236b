//! drawshapes core library
//!
//! Scene model for a 2D shape editor: shapes, spatial queries, z-order, the scene text format,
//! snapshot undo/redo, periodic effects and storage.

pub mod codec;
pub mod config;
pub mod editor;
pub mod effects;
pub mod geometry;
pub mod history;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod storage;

pub use codec::{CodecError, RecordFault, parse_shapes, serialize};
pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorError, KEY_BINDINGS, MouseButton};
pub use effects::{EffectKind, EffectScheduler, EffectTask, EffectTiming};
pub use geometry::{BoundingBox, Point};
pub use history::{History, HistoryDirection, HistoryError, RedoPolicy};
pub use scene::Scene;
pub use selection::{DragState, SelectionRectangle};
pub use shapes::{Bounded, Color, DrawCommand, ScaleDirection, Shape, ShapeError, ShapeId, ShapeKind};
pub use storage::{FileStorage, MemoryStorage, SceneStorage, StorageError};

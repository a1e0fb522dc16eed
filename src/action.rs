#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Navigate(Direction),
    PinCurrent,
    UnpinSelected,
    LogNewObjects,
    CycleKind,
    CycleTheme,
    ToggleDelta,
    LoadBatch,
    UnloadBatch,
    ToggleHelp,
    None,
}

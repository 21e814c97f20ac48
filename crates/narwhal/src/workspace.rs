use narwhal_core::{
    ControlPoints, Engine, Outline, ParsedStory, Point, Size, StepKey, StorySummary, View,
    WorkingGraph, compose,
};
use narwhal_layout::{
    Algorithm, FitOptions, LayoutOptions, RouteOptions, RoutedEdge, Viewport, apply_layout,
    place_unplaced, route_edges,
};

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Core(#[from] narwhal_core::Error),
    #[error(transparent)]
    Layout(#[from] narwhal_layout::Error),
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;

/// One editing session: the latest parse, the selected view, the working graph and everything
/// attached to it (control points, viewport).
///
/// Every method applies one complete edit. Callers serialize edits; nothing here is shared.
#[derive(Debug, Clone)]
pub struct Workspace {
    engine: Engine,
    source: String,
    story: ParsedStory,
    view: View,
    graph: WorkingGraph,
    control_points: ControlPoints,
    layout: LayoutOptions,
    route: RouteOptions,
    fit: FitOptions,
    viewport: Viewport,
    /// Last size passed to [`Workspace::fit_viewport`]; a layout run refits to it.
    view_size: Option<Size>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Engine::new())
    }
}

impl Workspace {
    pub fn new(engine: Engine) -> Self {
        let config = engine.config();
        let layout = LayoutOptions::from_config(config);
        let route = RouteOptions::from_config(config);
        let fit = FitOptions::from_config(config);
        Self {
            engine,
            source: String::new(),
            story: ParsedStory::default(),
            view: View::All,
            graph: WorkingGraph::default(),
            control_points: ControlPoints::default(),
            layout,
            route,
            fit,
            viewport: Viewport::default(),
            view_size: None,
        }
    }

    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.layout.canvas = canvas;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn story(&self) -> &ParsedStory {
        &self.story
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn graph(&self) -> &WorkingGraph {
        &self.graph
    }

    pub fn control_points(&self) -> &ControlPoints {
        &self.control_points
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout_options(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Re-parses `text` and recomposes the current view.
    ///
    /// Actors whose name survives keep their position; new ones are seeded on the placement
    /// circle. Step identities are rebuilt, so every stored control point is dropped.
    pub fn update_text(&mut self, text: &str) -> &ParsedStory {
        self.source = text.to_string();
        self.story = self.engine.parse_story(text);
        self.control_points.clear();
        self.recompose(self.view);
        &self.story
    }

    /// Switches views. An index past the last domain selects [`View::All`].
    pub fn set_view(&mut self, view: View) -> View {
        self.recompose(view);
        self.view
    }

    pub fn next_view(&mut self) -> View {
        self.set_view(self.view.next(self.story.domains.len()))
    }

    pub fn prev_view(&mut self) -> View {
        self.set_view(self.view.prev(self.story.domains.len()))
    }

    fn recompose(&mut self, view: View) {
        let composition = compose(&self.story.domains, view, Some(&self.graph));
        if !composition.released.is_empty() {
            tracing::debug!(released = ?composition.released, "released actors");
        }
        self.graph = composition.graph;
        self.view = self.graph.view;
        place_unplaced(&mut self.graph, &self.layout);
    }

    /// Runs a layout algorithm over every working actor. Clears all control points and refits
    /// the viewport when a view size is known.
    pub fn apply_layout(&mut self, algorithm: &Algorithm) -> Result<()> {
        apply_layout(
            &mut self.graph,
            &mut self.control_points,
            algorithm,
            &self.layout,
            self.route.default_size,
        )?;
        if let Some(size) = self.view_size {
            self.fit_viewport(size);
        }
        Ok(())
    }

    /// [`Workspace::apply_layout`] by name (`radial`, `grid`, `flow`, `force` or an alias).
    pub fn apply_layout_named(&mut self, name: &str) -> Result<()> {
        let algorithm = Algorithm::from_name(name, self.engine.config())?;
        self.apply_layout(&algorithm)
    }

    /// Drag entry point. Control points stay where they are; the curve follows on the next
    /// [`Workspace::routed_edges`].
    pub fn move_actor(&mut self, key: &str, to: Point) -> Result<()> {
        self.graph.move_actor(key, to)?;
        Ok(())
    }

    /// Drag entry point for a curve handle. Stored verbatim.
    pub fn set_control_point(&mut self, step: StepKey, at: Point) {
        self.control_points.set(step, at);
    }

    pub fn reset_control_points(&mut self) {
        self.control_points.clear();
    }

    pub fn record_actor_size(&mut self, key: &str, width: f64, height: f64) -> Result<bool> {
        Ok(self.graph.record_size(key, width, height)?)
    }

    /// Geometry for every resolved step at the current zoom. Newly computed control points are
    /// stored and reused from then on.
    pub fn routed_edges(&mut self) -> Vec<RoutedEdge> {
        let opts = self.route.clone().with_zoom(self.viewport.zoom);
        route_edges(&self.graph, &mut self.control_points, &opts)
    }

    /// Fits all placed actors into `view_size`. Without placed actors the viewport is left as is.
    pub fn fit_viewport(&mut self, view_size: Size) -> Viewport {
        self.view_size = Some(view_size);
        let points = self.graph.actors.values().filter_map(|a| a.position);
        if let Some(vp) = Viewport::fit(points, view_size, &self.fit) {
            self.viewport = vp;
        }
        self.viewport
    }

    pub fn zoom_to(&mut self, zoom: f64) -> Viewport {
        self.viewport.zoom_to(zoom, &self.fit);
        self.viewport
    }

    pub fn outline(&self) -> Outline {
        Outline::build(&self.story.domains, self.view)
    }

    pub fn summary(&self) -> StorySummary {
        StorySummary::new(&self.source, &self.story, &self.graph)
    }
}

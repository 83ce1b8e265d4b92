//! Gráfico de barras "alunos por série" renderizado a SVG con plotters.
//!
//! `ChartCanvas` guarda el último gráfico dibujado. Antes de cada redibujo el
//! anterior se descarta explícitamente, de modo que nunca hay dos instancias.

use plotters::prelude::*;
use tracing::debug;

use crate::algorithm::DegreeCount;
use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions { width: 800, height: 400 }
    }
}

/// Un gráfico ya dibujado, asociado a la revisión de datos que lo originó.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub revision: u64,
    pub bars: usize,
    pub svg: String,
}

#[derive(Debug, Default)]
pub struct ChartCanvas {
    options: ChartOptions,
    current: Option<RenderedChart>,
    disposed: u64,
}

impl ChartCanvas {
    pub fn new(options: ChartOptions) -> Self {
        ChartCanvas { options, current: None, disposed: 0 }
    }

    /// Cantidad de gráficos descartados hasta ahora.
    pub fn disposed(&self) -> u64 {
        self.disposed
    }

    /// Devuelve el gráfico para `revision`, redibujando solo si está viejo.
    pub fn ensure(&mut self, revision: u64, counts: &[DegreeCount]) -> Result<&RenderedChart, ChartError> {
        let stale = self.current.as_ref().is_none_or(|c| c.revision != revision);
        if stale {
            self.redraw(revision, counts)?;
        }
        self.current
            .as_ref()
            .ok_or_else(|| ChartError("no chart after redraw".to_string()))
    }

    /// Descarta el gráfico anterior y dibuja uno nuevo.
    pub fn redraw(&mut self, revision: u64, counts: &[DegreeCount]) -> Result<&RenderedChart, ChartError> {
        if let Some(previous) = self.current.take() {
            self.disposed += 1;
            debug!(revision = previous.revision, "descartando gráfico anterior");
            drop(previous);
        }
        let svg = render_bar_chart(counts, self.options)?;
        let chart = self.current.insert(RenderedChart {
            revision,
            bars: counts.len(),
            svg,
        });
        Ok(&*chart)
    }
}

/// Dibuja una barra por série, en el orden recibido.
pub fn render_bar_chart(counts: &[DegreeCount], options: ChartOptions) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let slots = counts.len().max(1) as u32;
        let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0) as u32;
        let labels: Vec<String> = counts.iter().map(|c| c.degree_name.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption("Alunos por Série", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..max_count + 1)
            .map_err(draw_err)?;

        let label_for = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots as usize)
            .x_label_formatter(&label_for)
            .y_desc("Alunos")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(RGBColor(54, 162, 235).filled())
                    .margin(10)
                    .data(counts.iter().enumerate().map(|(i, c)| (i as u32, c.count as u32))),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError(e.to_string())
}

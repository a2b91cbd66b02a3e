/// Tables (`w:tbl`) of a WordprocessingML body.
///
/// Only one level is modelled: a table nested inside a cell is skipped.
use crate::ooxml::docx::paragraph::{Paragraph, w_val};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Debug, Clone, Default)]
pub struct Table {
    style_id: Option<String>,
    /// Number of `w:gridCol` entries
    grid_columns: usize,
    rows: Vec<Row>,
}

impl Table {
    /// Parse the first table found in an XML fragment.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        loop {
            match reader.read_event()? {
                Event::Start(e) if e.local_name().as_ref() == b"tbl" => return Self::parse(&mut reader),
                Event::Eof => return Err(OoxmlError::Xml("no table element found".to_string())),
                _ => {},
            }
        }
    }

    pub(crate) fn parse(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut table = Self::default();
        let mut in_tbl_pr = false;
        let mut in_grid = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tblPr" => in_tbl_pr = true,
                    b"tblGrid" => in_grid = true,
                    b"tblPrChange" | b"tblGridChange" => {
                        reader.read_to_end(e.name())?;
                    },
                    b"tblStyle" if in_tbl_pr => table.style_id = w_val(&e)?,
                    b"gridCol" if in_grid => table.grid_columns += 1,
                    b"tr" => table.rows.push(Row::parse(reader)?),
                    _ => {},
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"tblStyle" if in_tbl_pr => table.style_id = w_val(&e)?,
                    b"gridCol" if in_grid => table.grid_columns += 1,
                    _ => {},
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"tblPr" => in_tbl_pr = false,
                    b"tblGrid" => in_grid = false,
                    b"tbl" => break,
                    _ => {},
                },
                Event::Eof => {
                    return Err(OoxmlError::Xml("unexpected end of part inside w:tbl".to_string()));
                },
                _ => {},
            }
        }

        Ok(table)
    }

    /// The table style id (`w:tblPr/w:tblStyle/@w:val`).
    #[inline]
    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid columns, or the columns the first row spans when the grid is missing.
    pub fn column_count(&self) -> usize {
        if self.grid_columns > 0 {
            self.grid_columns
        } else {
            self.rows.first().map_or(0, Row::column_span)
        }
    }
}

/// A table row (`w:tr`).
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    fn parse(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut row = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tc" => row.cells.push(Cell::parse(reader)?),
                    b"trPr" | b"tblPrEx" => {
                        reader.read_to_end(e.name())?;
                    },
                    _ => {},
                },
                Event::End(e) if e.local_name().as_ref() == b"tr" => break,
                Event::Eof => {
                    return Err(OoxmlError::Xml("unexpected end of part inside w:tr".to_string()));
                },
                _ => {},
            }
        }
        Ok(row)
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells paired with the grid column each one starts at.
    pub fn cells_by_column(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().scan(0usize, |column, cell| {
            let start = *column;
            *column += cell.grid_span();
            Some((start, cell))
        })
    }

    /// Grid columns covered by the row's cells.
    pub fn column_span(&self) -> usize {
        self.cells.iter().map(Cell::grid_span).sum()
    }
}

/// A table cell (`w:tc`).
#[derive(Debug, Clone, Default)]
pub struct Cell {
    paragraphs: Vec<Paragraph>,
    /// `w:tcPr/w:gridSpan/@w:val`, when present
    grid_span: Option<usize>,
}

impl Cell {
    fn parse(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut cell = Self::default();
        let mut in_tc_pr = false;
        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tcPr" => in_tc_pr = true,
                    b"p" if !in_tc_pr => cell.paragraphs.push(Paragraph::parse(reader)?),
                    b"gridSpan" if in_tc_pr => cell.grid_span = grid_span_value(&e)?,
                    b"tbl" | b"tcPrChange" => {
                        reader.read_to_end(e.name())?;
                    },
                    _ => {},
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"gridSpan" if in_tc_pr => cell.grid_span = grid_span_value(&e)?,
                    b"p" if !in_tc_pr => cell.paragraphs.push(Paragraph::default()),
                    _ => {},
                },
                Event::End(e) if e.local_name().as_ref() == b"tcPr" => in_tc_pr = false,
                Event::End(e) if e.local_name().as_ref() == b"tc" => break,
                Event::Eof => {
                    return Err(OoxmlError::Xml("unexpected end of part inside w:tc".to_string()));
                },
                _ => {},
            }
        }
        Ok(cell)
    }

    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Text of all paragraphs joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of grid columns the cell covers; at least 1.
    #[inline]
    pub fn grid_span(&self) -> usize {
        self.grid_span.unwrap_or(1).max(1)
    }
}

fn grid_span_value(e: &BytesStart) -> Result<Option<usize>> {
    Ok(w_val(e)?.and_then(|val| atoi_simd::parse::<usize, false, false>(val.as_bytes()).ok()))
}

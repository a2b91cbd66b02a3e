/// Paragraphs and runs of a WordprocessingML body.
///
/// Parsing is event driven: each `parse` function is called right after the
/// start tag of its element and consumes events up to the matching end tag.
use crate::ooxml::docx::format::{ParagraphAlignment, RgbColor, RunFormatting};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use smallvec::SmallVec;

/// A paragraph (`w:p`).
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    style_id: Option<String>,
    alignment: Option<ParagraphAlignment>,
    runs: SmallVec<[Run; 8]>,
}

impl Paragraph {
    /// Parse the first paragraph found in an XML fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use doctrans::ooxml::docx::Paragraph;
    ///
    /// let xml = br#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    ///     <w:r><w:t>Hello</w:t></w:r>
    /// </w:p>"#;
    /// let para = Paragraph::from_xml(xml)?;
    /// assert_eq!(para.text(), "Hello");
    /// # Ok::<(), doctrans::ooxml::error::OoxmlError>(())
    /// ```
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        loop {
            match reader.read_event()? {
                Event::Start(e) if e.local_name().as_ref() == b"p" => return Self::parse(&mut reader),
                Event::Empty(e) if e.local_name().as_ref() == b"p" => return Ok(Self::default()),
                Event::Eof => return Err(OoxmlError::Xml("no paragraph element found".to_string())),
                _ => {},
            }
        }
    }

    pub(crate) fn parse(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut paragraph = Self::default();
        let mut in_ppr = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"pPr" => in_ppr = true,
                    // Paragraph mark formatting, revision history and section breaks
                    b"rPr" | b"pPrChange" | b"sectPr" if in_ppr => {
                        reader.read_to_end(e.name())?;
                    },
                    b"pStyle" | b"jc" if in_ppr => paragraph.apply_property(&e)?,
                    b"r" if !in_ppr => paragraph.runs.push(Run::parse(reader)?),
                    // Deleted and moved-away text, equations and the legacy branch of
                    // mc:AlternateContent are not part of the visible text
                    b"del" | b"moveFrom" | b"oMath" | b"oMathPara" | b"Fallback" => {
                        reader.read_to_end(e.name())?;
                    },
                    _ => {},
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"pStyle" | b"jc" if in_ppr => paragraph.apply_property(&e)?,
                    b"r" if !in_ppr => paragraph.runs.push(Run::default()),
                    _ => {},
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"pPr" => in_ppr = false,
                    b"p" => break,
                    _ => {},
                },
                Event::Eof => {
                    return Err(OoxmlError::Xml("unexpected end of part inside w:p".to_string()));
                },
                _ => {},
            }
        }

        Ok(paragraph)
    }

    fn apply_property(&mut self, e: &BytesStart) -> Result<()> {
        let Some(value) = w_val(e)? else {
            return Ok(());
        };
        match e.local_name().as_ref() {
            b"pStyle" => self.style_id = Some(value),
            b"jc" => self.alignment = ParagraphAlignment::from_xml_value(&value),
            _ => {},
        }
        Ok(())
    }

    /// The paragraph style id (`w:pStyle/@w:val`), a key into the style registry.
    #[inline]
    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    #[inline]
    pub fn alignment(&self) -> Option<ParagraphAlignment> {
        self.alignment
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// True if any run references an embedded image.
    pub fn has_images(&self) -> bool {
        self.runs.iter().any(Run::has_image)
    }
}

/// A run (`w:r`): text sharing one set of direct formatting.
#[derive(Debug, Clone, Default)]
pub struct Run {
    text: String,
    formatting: RunFormatting,
    /// `a:blip/@r:embed` and `v:imagedata/@r:id` values in document order
    image_rel_ids: SmallVec<[String; 2]>,
}

impl Run {
    pub(crate) fn parse(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut run = Self::default();
        let mut in_rpr = false;
        let mut in_text = false;
        // Depth inside w:drawing / w:pict / w:object; only image references are read there
        let mut graphic_depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    // mc:Fallback repeats the mc:Choice content for older readers
                    if e.local_name().as_ref() == b"Fallback" {
                        reader.read_to_end(e.name())?;
                        continue;
                    }
                    if graphic_depth > 0 {
                        graphic_depth += 1;
                        run.collect_image_ref(&e)?;
                        continue;
                    }
                    match e.local_name().as_ref() {
                        b"rPr" => in_rpr = true,
                        b"rPrChange" => {
                            reader.read_to_end(e.name())?;
                        },
                        b"drawing" | b"pict" | b"object" => graphic_depth = 1,
                        b"t" if !in_rpr => in_text = true,
                        _ if in_rpr => run.apply_property(&e)?,
                        _ => {},
                    }
                },
                Event::Empty(e) => {
                    if graphic_depth > 0 {
                        run.collect_image_ref(&e)?;
                        continue;
                    }
                    if in_rpr {
                        run.apply_property(&e)?;
                        continue;
                    }
                    match e.local_name().as_ref() {
                        b"tab" => run.text.push('\t'),
                        b"br" | b"cr" => run.text.push('\n'),
                        _ => {},
                    }
                },
                Event::Text(e) if in_text => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| OoxmlError::Xml(format!("invalid UTF-8 in w:t: {}", err)))?;
                    run.text.push_str(text);
                },
                Event::GeneralRef(e) if in_text => push_entity(&mut run.text, &e)?,
                Event::End(e) => {
                    if graphic_depth > 0 {
                        graphic_depth -= 1;
                        continue;
                    }
                    match e.local_name().as_ref() {
                        b"t" => in_text = false,
                        b"rPr" => in_rpr = false,
                        b"r" => break,
                        _ => {},
                    }
                },
                Event::Eof => {
                    return Err(OoxmlError::Xml("unexpected end of part inside w:r".to_string()));
                },
                _ => {},
            }
        }

        Ok(run)
    }

    fn apply_property(&mut self, e: &BytesStart) -> Result<()> {
        let fmt = &mut self.formatting;
        match e.local_name().as_ref() {
            b"b" => fmt.bold = Some(toggle_value(e)?),
            b"i" => fmt.italic = Some(toggle_value(e)?),
            b"u" => fmt.underline = Some(w_val(e)?.is_none_or(|val| val != "none")),
            b"sz" => {
                if let Some(val) = w_val(e)?
                    && let Ok(half_points) = atoi_simd::parse::<u32, false, false>(val.as_bytes())
                {
                    fmt.font_size = Some(half_points);
                }
            },
            b"rFonts" => {
                if let Some(name) = attr_value(e, b"ascii")? {
                    fmt.font_name = Some(name);
                }
            },
            b"color" => fmt.color = w_val(e)?.and_then(|val| RgbColor::from_hex(&val)),
            _ => {},
        }
        Ok(())
    }

    fn collect_image_ref(&mut self, e: &BytesStart) -> Result<()> {
        let attr_name: &[u8] = match e.local_name().as_ref() {
            b"blip" => b"embed",
            b"imagedata" => b"id",
            _ => return Ok(()),
        };
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.local_name().as_ref() == attr_name
                && memchr::memchr(b':', attr.key.as_ref()).is_some()
            {
                let r_id = attr.unescape_value()?;
                if !r_id.is_empty() {
                    self.image_rel_ids.push(r_id.into_owned());
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn formatting(&self) -> &RunFormatting {
        &self.formatting
    }

    /// Relationship ids of the images embedded in this run.
    #[inline]
    pub fn image_rel_ids(&self) -> &[String] {
        &self.image_rel_ids
    }

    #[inline]
    pub fn has_image(&self) -> bool {
        !self.image_rel_ids.is_empty()
    }
}

/// Value of the attribute with local name `name`, unescaped.
pub(crate) fn attr_value(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// The `w:val` attribute of a property element.
#[inline]
pub(crate) fn w_val(e: &BytesStart) -> Result<Option<String>> {
    attr_value(e, b"val")
}

/// ST_OnOff: a missing `w:val` means on.
fn toggle_value(e: &BytesStart) -> Result<bool> {
    Ok(w_val(e)?.is_none_or(|val| !matches!(val.as_str(), "0" | "false" | "off")))
}

/// Append the text an entity or character reference inside `w:t` stands for.
fn push_entity(text: &mut String, e: &BytesRef) -> Result<()> {
    let name = std::str::from_utf8(e)
        .map_err(|err| OoxmlError::Xml(format!("invalid entity reference: {}", err)))?;

    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse::<u32>(),
        };
        let ch = parsed
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| OoxmlError::Xml(format!("invalid character reference &{};", name)))?;
        text.push(ch);
        return Ok(());
    }

    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => return Err(OoxmlError::Xml(format!("unknown entity &{};", name))),
    };
    text.push_str(resolved);
    Ok(())
}

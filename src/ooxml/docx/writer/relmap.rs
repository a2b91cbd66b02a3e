/// Relationship ids handed out to images while a document is serialized.
///
/// Images are registered in the same order the body serializer visits them,
/// so the serializer can take ids one by one without looking anything up.
use crate::ooxml::error::{OoxmlError, Result};

#[derive(Debug, Default)]
pub struct RelationshipMapper {
    image_ids: Vec<String>,
    /// Next image to be emitted
    cursor: usize,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the relationship id of the next image in document order.
    pub fn add_image(&mut self, rel_id: String) {
        self.image_ids.push(rel_id);
    }

    /// Take the id for the next image, together with its 1-based drawing number.
    pub(crate) fn next_image(&mut self) -> Result<(&str, usize)> {
        let index = self.cursor;
        let id = self.image_ids.get(index).ok_or_else(|| {
            OoxmlError::Xml(format!("no relationship registered for image {}", index + 1))
        })?;
        self.cursor += 1;
        Ok((id.as_str(), index + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_are_taken_in_order() {
        let mut mapper = RelationshipMapper::new();
        mapper.add_image("rId2".to_string());
        mapper.add_image("rId3".to_string());

        assert_eq!(mapper.next_image().unwrap(), ("rId2", 1));
        assert_eq!(mapper.next_image().unwrap(), ("rId3", 2));
        assert!(mapper.next_image().is_err());
    }
}

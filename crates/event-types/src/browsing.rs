//! Product-browsing events: searches, list views, list filters.

use crate::error::DecodeError;
use crate::message::EventMessage;
use crate::wire::{self, WIRE_TYPE_LEN};
use protobuf::{CodedInputStream, CodedOutputStream};

/// A shopper searched the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsSearched {
    pub search_id: String,
    pub query: String,
    pub result_product_ids: Vec<String>,
}

impl EventMessage for ProductsSearched {
    const TYPE_NAME: &'static str = "ProductsSearched";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.search_id.is_empty() {
            stream.write_string(1, &self.search_id)?;
        }
        if !self.query.is_empty() {
            stream.write_string(2, &self.query)?;
        }
        for product_id in &self.result_product_ids {
            stream.write_string(3, product_id)?;
        }
        Ok(())
    }

    fn merge_field(
        &mut self,
        number: u32,
        wire_type: u32,
        stream: &mut CodedInputStream<'_>,
    ) -> Result<(), DecodeError> {
        wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
        match number {
            1 => self.search_id = wire::read_string(Self::TYPE_NAME, stream)?,
            2 => self.query = wire::read_string(Self::TYPE_NAME, stream)?,
            3 => self
                .result_product_ids
                .push(wire::read_string(Self::TYPE_NAME, stream)?),
            _ => {
                return Err(DecodeError::UnknownField {
                    type_name: Self::TYPE_NAME,
                    number,
                })
            }
        }
        Ok(())
    }
}

/// A shopper viewed a product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListViewed {
    pub view_id: String,
    pub list_id: String,
    pub product_ids: Vec<String>,
}

impl EventMessage for ProductListViewed {
    const TYPE_NAME: &'static str = "ProductListViewed";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.view_id.is_empty() {
            stream.write_string(1, &self.view_id)?;
        }
        if !self.list_id.is_empty() {
            stream.write_string(2, &self.list_id)?;
        }
        for product_id in &self.product_ids {
            stream.write_string(3, product_id)?;
        }
        Ok(())
    }

    fn merge_field(
        &mut self,
        number: u32,
        wire_type: u32,
        stream: &mut CodedInputStream<'_>,
    ) -> Result<(), DecodeError> {
        wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
        match number {
            1 => self.view_id = wire::read_string(Self::TYPE_NAME, stream)?,
            2 => self.list_id = wire::read_string(Self::TYPE_NAME, stream)?,
            3 => self
                .product_ids
                .push(wire::read_string(Self::TYPE_NAME, stream)?),
            _ => {
                return Err(DecodeError::UnknownField {
                    type_name: Self::TYPE_NAME,
                    number,
                })
            }
        }
        Ok(())
    }
}

/// A shopper filtered a product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListFiltered {
    pub filter_id: String,
    pub filters: Vec<String>,
    pub product_ids: Vec<String>,
}

impl EventMessage for ProductListFiltered {
    const TYPE_NAME: &'static str = "ProductListFiltered";

    fn write_fields(&self, stream: &mut CodedOutputStream<'_>) -> protobuf::Result<()> {
        if !self.filter_id.is_empty() {
            stream.write_string(1, &self.filter_id)?;
        }
        for filter in &self.filters {
            stream.write_string(2, filter)?;
        }
        for product_id in &self.product_ids {
            stream.write_string(3, product_id)?;
        }
        Ok(())
    }

    fn merge_field(
        &mut self,
        number: u32,
        wire_type: u32,
        stream: &mut CodedInputStream<'_>,
    ) -> Result<(), DecodeError> {
        wire::check_wire_type(Self::TYPE_NAME, number, wire_type, WIRE_TYPE_LEN)?;
        match number {
            1 => self.filter_id = wire::read_string(Self::TYPE_NAME, stream)?,
            2 => self.filters.push(wire::read_string(Self::TYPE_NAME, stream)?),
            3 => self
                .product_ids
                .push(wire::read_string(Self::TYPE_NAME, stream)?),
            _ => {
                return Err(DecodeError::UnknownField {
                    type_name: Self::TYPE_NAME,
                    number,
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_searched_round_trip() {
        let event = ProductsSearched {
            search_id: "s-1".to_string(),
            query: "walnut desk".to_string(),
            result_product_ids: vec!["p-1".to_string(), "p-7".to_string()],
        };
        let decoded = ProductsSearched::decode(&event.encode().unwrap()).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_list_filtered_round_trip_preserves_order() {
        let event = ProductListFiltered {
            filter_id: "f-1".to_string(),
            filters: vec!["price<50".to_string(), "color=oak".to_string()],
            product_ids: vec!["p-3".to_string(), "p-2".to_string(), "p-9".to_string()],
        };
        let decoded = ProductListFiltered::decode(&event.encode().unwrap()).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_list_viewed_round_trip() {
        let event = ProductListViewed {
            view_id: "v-1".to_string(),
            list_id: "featured".to_string(),
            product_ids: vec!["p-4".to_string()],
        };
        let decoded = ProductListViewed::decode(&event.encode().unwrap()).unwrap();
        assert_eq!(event, decoded);
    }
}

use crate::region::RegionDescriptor;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchRegions,
    SelectRegion(RegionDescriptor),
    RemoveSelection,
    Quit,
}

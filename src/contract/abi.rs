//! Fixed ABI of the deployed product registry.

use alloy::sol;

sol! {
    /// Product provenance registry.
    interface IProductRegistry {
        #[derive(Debug, PartialEq, Eq)]
        event OwnershipTransferred(uint256 productId, address from, address to);

        #[derive(Debug, PartialEq, Eq)]
        event ProductDelivered(uint256 productId);

        #[derive(Debug, PartialEq, Eq)]
        event ProductRegistered(uint256 productId, string name, string manufacturer);

        #[derive(Debug, PartialEq, Eq)]
        function registerProduct(string name, string manufacturer) external;

        #[derive(Debug, PartialEq, Eq)]
        function transferOwnership(uint256 productId, address newOwner) external;

        #[derive(Debug, PartialEq, Eq)]
        function markAsDelivered(uint256 productId) external;

        #[derive(Debug, PartialEq, Eq)]
        function getProduct(uint256 productId) external view returns (
            uint256 id,
            string name,
            string manufacturer,
            address currentOwner,
            uint256 timestamp,
            bool isDelivered
        );

        #[derive(Debug, PartialEq, Eq)]
        function getOwnershipHistory(uint256 productId) external view returns (address[]);
    }
}

pub use IProductRegistry::{
    getOwnershipHistoryCall, getProductCall, getProductReturn, markAsDeliveredCall, registerProductCall,
    transferOwnershipCall, OwnershipTransferred, ProductDelivered, ProductRegistered,
};

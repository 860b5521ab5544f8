use alloy::sol;

sol! {
    /// The slice of the prize registry the auction relies on: moving an item
    /// it holds in custody to a winner.
    interface IPrizeRegistry {
        function transferFrom(address from, address to, uint256 tokenId) external;
    }
}

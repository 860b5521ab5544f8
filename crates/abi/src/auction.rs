use alloy::sol;

sol! {
    /// Emitted once per registered auction.
    event AuctionRegistered(
        uint256 indexed auctionId,
        uint64 startBlock,
        uint64 endBlock,
        uint256[] prizeItems,
        uint32 numWinners
    );

    /// Emitted for every accepted bid, before any eviction it causes.
    event BidPlaced(
        uint256 indexed auctionId,
        uint64 indexed bidId,
        address indexed user,
        uint256 amount
    );

    /// Emitted when a bid falls out of the ranked set and its value is returned.
    event BiddingRefund(address indexed user, uint256 amount);

    /// One per rank assigned at settlement.
    event PrizeAwarded(
        uint256 indexed auctionId,
        uint256 indexed prizeItem,
        address indexed winner,
        uint32 rank
    );

    event AuctionEnded(uint256 indexed auctionId, uint32 winners);
}
